//! Detail-page extraction: one listing entry to one full record

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;

use super::{
    absolutize, clean_text, dom::Node, fetch, fields, log_error, DownloadLink, Field, MovieRecord,
    ListingEntry,
};
use crate::config::SiteConfig;

/// Keyword synonyms for each metadata field, lowercase.
const Q_RELEASE: &[&str] = &["release date", "release", "date"];
const Q_COUNTRY: &[&str] = &["country"];
const Q_DURATION: &[&str] = &["duration", "runtime", "time"];
const Q_GENRES: &[&str] = &["genre", "category"];
const Q_DIRECTOR: &[&str] = &["director", "directed"];
const Q_CAST: &[&str] = &["cast", "actors", "stars"];
const Q_RATING: &[&str] = &["imdb", "rating"];

/// Fetch one entry's detail page and build its record.
///
/// Never fails: an unreachable page degrades to a record carrying only
/// the listing-derived fields plus an error marker.
pub async fn extract_detail(
    client: &Client,
    config: &SiteConfig,
    entry: &ListingEntry,
) -> MovieRecord {
    let url = absolutize(&entry.link, &config.base_url);
    match fetch(client, &url).await {
        Some(html) => extract_detail_from_html(&html, entry, config),
        None => {
            log_error("detail", &format!("fetch failed: {}", url));
            MovieRecord::fetch_failed(entry)
        }
    }
}

/// Parse a fetched detail page. Every sub-step is independently
/// best-effort; a miss in one field never blocks the others.
pub fn extract_detail_from_html(
    html: &str,
    entry: &ListingEntry,
    config: &SiteConfig,
) -> MovieRecord {
    let document = Html::parse_document(html);
    let mut record = MovieRecord::from_listing(entry);

    // (a) canonical title and year from the primary heading
    let heading = select_text(&document, "h1.entry-title").or_else(|| {
        select_text(&document, "title")
            .map(|t| t.split('|').next().unwrap_or("").trim().to_string())
            .filter(|t| !t.is_empty())
    });
    match heading {
        Some(raw) => {
            let (title, year) = split_year(&raw);
            if !title.is_empty() {
                record.title = title;
            }
            record.year = Field::from_attempt(year);
        }
        None => record.year = Field::Missing,
    }

    // (b) labeled metadata via the locator
    let root = Node::from_document(&document);
    record.release_date = fields::locate(&root, Q_RELEASE);
    record.country = fields::locate(&root, Q_COUNTRY);
    record.duration = fields::locate(&root, Q_DURATION);
    record.genres = fields::locate(&root, Q_GENRES);
    record.director = fields::locate(&root, Q_DIRECTOR);
    record.cast = fields::locate(&root, Q_CAST);
    record.imdb_rating = fields::locate(&root, Q_RATING);

    // (c) synopsis: longest qualifying paragraph
    record.synopsis = Field::from_attempt(find_synopsis(&document, config));

    // (d) cover image, resize suffix stripped for full resolution
    let cover = select_attr(&document, ".entry-content img", "src")
        .or_else(|| select_attr(&document, "meta[property='og:image']", "content"));
    match cover {
        Some(src) => record.cover_image = Field::Value(strip_resize_suffix(&src)),
        // keep a listing thumbnail if we had one
        None => {
            if !record.cover_image.is_value() {
                record.cover_image = Field::Missing;
            }
        }
    }

    // (e) download / mirror links
    record.download_links = find_download_links(&document, config);

    record
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(String::from)
        .filter(|v| !v.is_empty())
}

/// Split a parenthesized 4-digit year out of a heading.
/// "Avatar (2009)" -> ("Avatar", Some("2009"))
pub fn split_year(heading: &str) -> (String, Option<String>) {
    let re = match Regex::new(r"\((\d{4})\)") {
        Ok(r) => r,
        Err(_) => return (heading.to_string(), None),
    };
    match re.captures(heading) {
        Some(caps) => {
            let year = caps.get(1).map(|m| m.as_str().to_string());
            let title = clean_text(&re.replace(heading, ""));
            (title, year)
        }
        None => (clean_text(heading), None),
    }
}

/// Strip a "-WxH" thumbnail resize suffix so the original-resolution
/// image is requested. Idempotent on unsuffixed names.
pub fn strip_resize_suffix(url: &str) -> String {
    match Regex::new(r"-\d+x\d+(\.)") {
        Ok(re) => re.replace(url, "$1").to_string(),
        Err(_) => url.to_string(),
    }
}

fn find_synopsis(document: &Html, config: &SiteConfig) -> Option<String> {
    let p_sel = Selector::parse("p").ok()?;
    let mut best: Option<String> = None;
    for p in document.select(&p_sel) {
        let text = clean_text(&p.text().collect::<String>());
        if !config.synopsis.accepts(&text) {
            continue;
        }
        let longer = best
            .as_ref()
            .map_or(true, |b| text.chars().count() > b.chars().count());
        if longer {
            best = Some(text);
        }
    }
    best
}

fn find_download_links(document: &Html, config: &SiteConfig) -> Vec<DownloadLink> {
    let mut links = Vec::new();
    let anchor_sel = match Selector::parse("a") {
        Ok(s) => s,
        Err(_) => return links,
    };
    let mut seen: HashSet<String> = HashSet::new();

    for anchor in document.select(&anchor_sel) {
        let href = match anchor.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };
        // bare fragments and javascript handlers carry no target
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            continue;
        }

        let text = clean_text(&anchor.text().collect::<String>());
        let class = anchor.value().attr("class").unwrap_or("");
        let haystack = format!("{} {}", text, class).to_lowercase();
        if !config
            .download_keywords
            .iter()
            .any(|k| haystack.contains(k.as_str()))
        {
            continue;
        }
        if config
            .share_domains
            .iter()
            .any(|d| href.contains(d.as_str()))
        {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }

        links.push(DownloadLink {
            label: if text.is_empty() {
                "Download".to_string()
            } else {
                text
            },
            url: absolutize(href, &config.base_url),
        });
    }

    links
}
