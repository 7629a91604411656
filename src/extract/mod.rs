//! Resilient extraction engine for an unstable movie listing site

pub mod detail;
pub mod dom;
pub mod fields;
pub mod listing;
pub mod log;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER};
use reqwest::Client;
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::config::SiteConfig;

pub use detail::extract_detail;
pub use listing::extract_listing;
pub use log::{get_log_path, init_log, log_error, log_info};

/// Outcome of one metadata field extraction attempt.
///
/// `Unattempted` means extraction never ran (the detail fetch failed),
/// `Missing` means the page was scanned and the field was not found.
/// Keeping the two apart lets callers tell a blocked page from a page
/// that simply does not carry the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Unattempted,
    Missing,
    Value(String),
}

impl Field {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Value(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// Wrap a locator result, mapping `None` to `Missing`.
    pub fn from_attempt(value: Option<String>) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Missing,
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Unattempted => serializer.serialize_none(),
            Field::Missing => serializer.serialize_str("N/A"),
            Field::Value(s) => serializer.serialize_str(s),
        }
    }
}

/// What kind of content a listing entry points at, judged from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Movie,
    TvShow,
    Unknown,
}

impl Serialize for EntryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            EntryKind::Movie => "movie",
            EntryKind::TvShow => "tvshow",
            EntryKind::Unknown => "unknown",
        })
    }
}

/// One candidate entry pulled off a listing page.
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
    pub thumbnail: Option<String>,
    pub kind: EntryKind,
}

/// A classified download/mirror link from a detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}

/// Full record for one title, assembled best-effort from its detail page.
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: Field,
    pub release_date: Field,
    pub country: Field,
    pub duration: Field,
    pub genres: Field,
    pub director: Field,
    pub cast: Field,
    pub imdb_rating: Field,
    pub synopsis: Field,
    pub cover_image: Field,
    pub kind: EntryKind,
    #[serde(rename = "link")]
    pub source_link: String,
    pub download_links: Vec<DownloadLink>,
    /// Set when the detail fetch itself failed; listing fields still stand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MovieRecord {
    /// Record seeded from listing data alone, nothing attempted yet.
    pub fn from_listing(entry: &ListingEntry) -> Self {
        Self {
            title: entry.title.clone(),
            year: Field::Unattempted,
            release_date: Field::Unattempted,
            country: Field::Unattempted,
            duration: Field::Unattempted,
            genres: Field::Unattempted,
            director: Field::Unattempted,
            cast: Field::Unattempted,
            imdb_rating: Field::Unattempted,
            synopsis: Field::Unattempted,
            cover_image: match &entry.thumbnail {
                Some(src) => Field::Value(src.clone()),
                None => Field::Unattempted,
            },
            kind: entry.kind,
            source_link: entry.link.clone(),
            download_links: Vec::new(),
            error: None,
        }
    }

    /// Degraded record for an entry whose detail page could not be fetched.
    pub fn fetch_failed(entry: &ListingEntry) -> Self {
        let mut record = Self::from_listing(entry);
        record.error = Some("details fetch failed".to_string());
        record
    }
}

/// Aggregated result of one search request.
///
/// `NoMatches` and `Unreachable` are distinct on purpose: callers need to
/// tell "site reachable, nothing matched" from "site unreachable".
#[derive(Debug)]
pub enum SearchOutcome {
    Hits(Vec<MovieRecord>),
    NoMatches,
    Unreachable(String),
}

/// HTTP client with the configured browser-impersonation headers.
pub fn create_client(config: &SiteConfig) -> anyhow::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
    headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .build()
        .map_err(Into::into)
}

/// Fetch URL and return HTML. Any transport error, timeout or non-2xx
/// status collapses to `None`; single attempt, no retries.
pub async fn fetch(client: &Client, url: &str) -> Option<String> {
    client
        .get(url)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?
        .text()
        .await
        .ok()
}

/// Collapse runs of whitespace and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a possibly site-relative link against the configured base URL.
pub fn absolutize(link: &str, base_url: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else if link.starts_with("//") {
        format!("https:{}", link)
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            link.trim_start_matches('/')
        )
    }
}

/// Search the site and detail-fetch the top entries in parallel.
///
/// Listing order is preserved in the output. A failed detail fetch
/// degrades that one record only; the batch never fails as a whole.
pub async fn search(config: &SiteConfig, query: &str, max_results: usize) -> SearchOutcome {
    let client = match create_client(config) {
        Ok(c) => c,
        Err(e) => return SearchOutcome::Unreachable(format!("client setup failed: {}", e)),
    };

    let search_url = format!(
        "{}/?s={}",
        config.base_url.trim_end_matches('/'),
        urlencoding::encode(query)
    );
    log_info("search", &format!("Fetching: {}", search_url));

    let html = match fetch(&client, &search_url).await {
        Some(h) => h,
        None => {
            log_error("search", &format!("search page unreachable: {}", search_url));
            return SearchOutcome::Unreachable("site connection failed".to_string());
        }
    };

    let entries = extract_listing(&html, query, config);
    if entries.is_empty() {
        log_info("search", &format!("no entries for '{}'", query));
        return SearchOutcome::NoMatches;
    }

    let entries: Vec<ListingEntry> = entries.into_iter().take(max_results).collect();
    log_info(
        "search",
        &format!("{} entries for '{}', fetching details", entries.len(), query),
    );

    // join_all keeps result order aligned with listing order
    let tasks = entries.iter().map(|e| extract_detail(&client, config, e));
    let records = futures::future::join_all(tasks).await;

    SearchOutcome::Hits(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ListingEntry {
        ListingEntry {
            title: "Avatar (2009)".to_string(),
            link: "/movies/avatar-2009/".to_string(),
            thumbnail: Some("https://img.example/avatar.jpg".to_string()),
            kind: EntryKind::Movie,
        }
    }

    #[test]
    fn field_serializes_three_states_distinctly() {
        assert_eq!(serde_json::to_string(&Field::Unattempted).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Field::Missing).unwrap(), "\"N/A\"");
        assert_eq!(
            serde_json::to_string(&Field::Value("James Cameron".to_string())).unwrap(),
            "\"James Cameron\""
        );
    }

    #[test]
    fn fetch_failed_record_keeps_listing_fields_and_marks_error() {
        let record = MovieRecord::fetch_failed(&entry());
        assert_eq!(record.title, "Avatar (2009)");
        assert_eq!(record.source_link, "/movies/avatar-2009/");
        assert_eq!(
            record.cover_image,
            Field::Value("https://img.example/avatar.jpg".to_string())
        );
        assert_eq!(record.director, Field::Unattempted);
        assert!(record.error.is_some());
        assert!(record.download_links.is_empty());
    }

    #[test]
    fn record_without_thumbnail_leaves_cover_unattempted() {
        let mut e = entry();
        e.thumbnail = None;
        let record = MovieRecord::from_listing(&e);
        assert_eq!(record.cover_image, Field::Unattempted);
    }

    #[test]
    fn absolutize_handles_relative_and_absolute_links() {
        let base = "https://cinesubz.lk";
        assert_eq!(
            absolutize("/movies/avatar/", base),
            "https://cinesubz.lk/movies/avatar/"
        );
        assert_eq!(
            absolutize("https://other.site/x", base),
            "https://other.site/x"
        );
        assert_eq!(
            absolutize("//cdn.example/poster.jpg", base),
            "https://cdn.example/poster.jpg"
        );
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  The \n  Matrix \t(1999) "), "The Matrix (1999)");
    }

    #[test]
    fn error_field_omitted_from_json_when_absent() {
        let record = MovieRecord::from_listing(&entry());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"link\":\"/movies/avatar-2009/\""));

        let failed = MovieRecord::fetch_failed(&entry());
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("\"error\":\"details fetch failed\""));
    }

    // Aggregation tests run against a loopback fixture site so the
    // whole fetch -> listing -> detail fan-out path is exercised
    // without touching the real network.
    mod aggregation {
        use super::*;
        use axum::extract::Path;
        use axum::http::StatusCode;
        use axum::response::{Html, IntoResponse};
        use axum::routing::get;
        use axum::Router;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        async fn spawn_site(app: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{}", addr)
        }

        fn site_config(base_url: String) -> SiteConfig {
            SiteConfig {
                base_url,
                ..SiteConfig::default()
            }
        }

        /// Seven well-formed cards; detail page for m3 answers 503.
        fn seven_entry_site() -> Router {
            let mut cards = String::new();
            for i in 1..=7 {
                cards.push_str(&format!(
                    r#"<article><a href="/movies/m{i}"></a><h2 class="entry-title">Listing Movie {i}</h2></article>"#
                ));
            }
            let listing = format!("<html><body>{}</body></html>", cards);

            Router::new()
                .route(
                    "/",
                    get(move || {
                        let page = listing.clone();
                        async move { Html(page) }
                    }),
                )
                .route(
                    "/movies/:slug",
                    get(|Path(slug): Path<String>| async move {
                        if slug == "m3" {
                            return StatusCode::SERVICE_UNAVAILABLE.into_response();
                        }
                        Html(format!(
                            r#"<html><body>
                                <h1 class="entry-title">Detail {} (2009)</h1>
                                <p><b>Director:</b> Someone Famous</p>
                            </body></html>"#,
                            slug
                        ))
                        .into_response()
                    }),
                )
        }

        #[tokio::test]
        async fn caps_results_preserves_order_and_degrades_failures() {
            let base = spawn_site(seven_entry_site()).await;
            let config = site_config(base);

            let records = match search(&config, "movie", 5).await {
                SearchOutcome::Hits(records) => records,
                other => panic!("expected hits, got {:?}", other),
            };

            assert_eq!(records.len(), 5);
            let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(
                titles,
                vec![
                    "Detail m1",
                    "Detail m2",
                    "Listing Movie 3", // degraded entry keeps its listing title
                    "Detail m4",
                    "Detail m5",
                ]
            );

            let degraded = &records[2];
            assert!(degraded.error.is_some());
            assert_eq!(degraded.director, Field::Unattempted);
            assert_eq!(degraded.source_link, "/movies/m3");

            let full = &records[0];
            assert!(full.error.is_none());
            assert_eq!(full.year, Field::Value("2009".to_string()));
            assert_eq!(full.director, Field::Value("Someone Famous".to_string()));
        }

        #[tokio::test]
        async fn empty_listing_is_no_matches_not_unreachable() {
            let app = Router::new().route(
                "/",
                get(|| async { Html("<html><body><p>nothing here</p></body></html>".to_string()) }),
            );
            let base = spawn_site(app).await;
            let config = site_config(base);

            assert!(matches!(
                search(&config, "zzzznomatch", 5).await,
                SearchOutcome::NoMatches
            ));
        }

        #[tokio::test]
        async fn unreachable_search_page_skips_detail_fetches() {
            let detail_hits = Arc::new(AtomicUsize::new(0));
            let counter = detail_hits.clone();
            let app = Router::new()
                .route("/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
                .route(
                    "/movies/:slug",
                    get(move || {
                        let counter = counter.clone();
                        async move {
                            counter.fetch_add(1, Ordering::SeqCst);
                            Html("<html></html>".to_string())
                        }
                    }),
                );
            let base = spawn_site(app).await;
            let config = site_config(base);

            assert!(matches!(
                search(&config, "avatar", 5).await,
                SearchOutcome::Unreachable(_)
            ));
            assert_eq!(detail_hits.load(Ordering::SeqCst), 0);
        }
    }
}
