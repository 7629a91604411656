//! Two-tier listing extraction: structural pass, then brute-force link scan

use scraper::{Html, Selector};
use std::collections::HashSet;

use super::{clean_text, log_info, EntryKind, ListingEntry};
use crate::config::SiteConfig;

/// Titles this short are noise (icon alt-text, pagination arrows).
const MIN_TITLE_LEN: usize = 3;

fn classify(href: &str, config: &SiteConfig) -> EntryKind {
    if config.tv_paths.iter().any(|p| href.contains(p.as_str())) {
        EntryKind::TvShow
    } else if config.movie_paths.iter().any(|p| href.contains(p.as_str())) {
        EntryKind::Movie
    } else {
        EntryKind::Unknown
    }
}

/// Extract candidate entries from a listing/search page.
///
/// The structural pass assumes article-style result cards. When it finds
/// nothing (the site reshuffles its templates regularly) the fallback
/// pass scans every anchor in the document, keeping those whose href
/// carries a content path marker or whose text mentions the query. One
/// seen-set spans both passes, so no link is ever emitted twice.
pub fn extract_listing(html: &str, query: &str, config: &SiteConfig) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let article_sel = match Selector::parse("article") {
        Ok(s) => s,
        Err(_) => return entries,
    };
    let anchor_sel = match Selector::parse("a") {
        Ok(s) => s,
        Err(_) => return entries,
    };
    let title_sel = match Selector::parse(".entry-title, .title, h2") {
        Ok(s) => s,
        Err(_) => return entries,
    };
    let img_sel = match Selector::parse("img") {
        Ok(s) => s,
        Err(_) => return entries,
    };

    // Structural pass: result cards
    for article in document.select(&article_sel) {
        let anchor = match article.select(&anchor_sel).next() {
            Some(a) => a,
            None => continue,
        };
        let href = match anchor.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };

        let title = article
            .select(&title_sel)
            .next()
            .map(|t| clean_text(&t.text().collect::<String>()))
            .unwrap_or_default();
        if title.chars().count() < MIN_TITLE_LEN {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }

        let thumbnail = article
            .select(&img_sel)
            .next()
            .and_then(|i| i.value().attr("src"))
            .map(String::from);

        entries.push(ListingEntry {
            title,
            link: href.to_string(),
            thumbnail,
            kind: classify(href, config),
        });
    }

    if !entries.is_empty() {
        return entries;
    }

    // Fallback pass: the card markup changed, but link conventions rarely do
    log_info("listing", "structural pass empty, scanning all anchors");
    let needle = query.to_lowercase();

    for anchor in document.select(&anchor_sel) {
        let href = match anchor.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        if seen.contains(href) {
            continue;
        }

        let text = clean_text(&anchor.text().collect::<String>());
        let attr_title = anchor.value().attr("title").unwrap_or("").trim();
        let img = anchor.select(&img_sel).next();
        let img_alt = img
            .and_then(|i| i.value().attr("alt"))
            .unwrap_or("")
            .trim();

        let on_content_path = config.content_paths().any(|p| href.contains(p));
        let mentions_query = !needle.is_empty()
            && (text.to_lowercase().contains(&needle)
                || attr_title.to_lowercase().contains(&needle)
                || img_alt.to_lowercase().contains(&needle));
        if !on_content_path && !mentions_query {
            continue;
        }

        // title attribute tends to be cleaner than anchor text; image alt
        // is the last resort for image-only anchors
        let title = if !attr_title.is_empty() {
            attr_title.to_string()
        } else if !text.is_empty() {
            text
        } else {
            img_alt.to_string()
        };
        if title.chars().count() < MIN_TITLE_LEN {
            continue;
        }

        seen.insert(href.to_string());
        let thumbnail = img.and_then(|i| i.value().attr("src")).map(String::from);

        entries.push(ListingEntry {
            title,
            link: href.to_string(),
            thumbnail,
            kind: classify(href, config),
        });
    }

    entries
}
