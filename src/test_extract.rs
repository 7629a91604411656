//! Live extraction smoke-test binary

use cinescout::config::SiteConfig;
use cinescout::extract::{self, SearchOutcome};

#[tokio::main]
async fn main() {
    // Load env
    dotenvy::dotenv().ok();

    extract::init_log();

    let query = std::env::args().nth(1).unwrap_or_else(|| "avatar".to_string());
    println!("Searching for: {}", query);
    println!("---");

    let config = SiteConfig::default();
    match extract::search(&config, &query, config.max_results).await {
        SearchOutcome::Unreachable(reason) => {
            println!("Site unreachable: {}", reason);
        }
        SearchOutcome::NoMatches => {
            println!("No results for '{}'", query);
        }
        SearchOutcome::Hits(records) => {
            println!("{} records:", records.len());
            for r in &records {
                let status = match &r.error {
                    Some(e) => format!("PARTIAL ({})", e),
                    None => "OK".to_string(),
                };
                println!(
                    "\n[{}] {} {}",
                    status,
                    r.title,
                    r.year.as_str().map(|y| format!("({})", y)).unwrap_or_default()
                );
                if let Some(d) = r.director.as_str() {
                    println!("  director: {}", d);
                }
                if let Some(g) = r.genres.as_str() {
                    println!("  genres:   {}", g);
                }
                println!("  link:     {}", r.source_link);
                println!("  downloads: {}", r.download_links.len());
            }
        }
    }
}
