//! cinescout - JSON API for best-effort movie metadata extraction

use anyhow::Result;
use cinescout::config::SiteConfig;
use cinescout::extract;
use cinescout::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load env
    dotenvy::dotenv().ok();

    extract::init_log();
    if let Some(path) = extract::get_log_path() {
        println!("Logging to {}", path.display());
    }

    let mut config = SiteConfig::default();
    if let Ok(base) = std::env::var("CINESCOUT_BASE_URL") {
        config.base_url = base;
    }

    let host = std::env::var("CINESCOUT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("CINESCOUT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    server::serve(config, &host, port).await
}
