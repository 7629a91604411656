//! Thin JSON API over the extraction engine
//!
//! Parameter validation, response shaping, status codes and CORS live
//! here; the engine itself knows nothing about HTTP serving.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::caption;
use crate::config::SiteConfig;
use crate::extract::{self, log_info, MovieRecord, SearchOutcome};

/// Upper bound on `limit` regardless of what the client asks for.
const MAX_LIMIT: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
}

/// Create the router with all routes and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<usize>,
}

async fn index() -> impl IntoResponse {
    Json(json!({ "msg": "API working! Use /search?q=deadpool" }))
}

/// Serialize a record and attach its share caption.
fn record_json(record: &MovieRecord) -> Value {
    let caption = caption::whatsapp_caption(record);
    match serde_json::to_value(record) {
        Ok(Value::Object(mut map)) => {
            map.insert("whatsapp_caption".to_string(), json!(caption));
            Value::Object(map)
        }
        _ => json!({ "title": record.title, "link": record.source_link }),
    }
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Please add ?q=movie_name" })),
            )
                .into_response();
        }
    };

    let limit = params
        .limit
        .unwrap_or(state.config.max_results)
        .clamp(1, MAX_LIMIT);

    log_info("server", &format!("Searching for: {}", query));

    match extract::search(&state.config, &query, limit).await {
        SearchOutcome::Hits(records) => {
            let results: Vec<Value> = records.iter().map(record_json).collect();
            Json(json!({
                "status": "success",
                "query": query,
                "count": results.len(),
                "results": results,
            }))
            .into_response()
        }
        SearchOutcome::NoMatches => Json(json!({
            "status": "failed",
            "message": format!("No results found for '{}'. Try a different name.", query),
        }))
        .into_response(),
        SearchOutcome::Unreachable(reason) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "Site connection failed", "reason": reason })),
        )
            .into_response(),
    }
}

/// Bind and run the server.
pub async fn serve(config: SiteConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState {
        config: Arc::new(config),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    log_info("server", &format!("listening on http://{}", addr));
    println!("cinescout listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
