//! Site configuration passed explicitly into the fetcher and extractors

/// Rule deciding whether a paragraph qualifies as a synopsis candidate.
///
/// The target site writes synopses in its native script, so the default
/// requires at least one character from the Sinhala Unicode block. Set
/// `script_range` to `None` when pointing the engine at a site whose
/// synopses are plain Latin text.
#[derive(Debug, Clone)]
pub struct SynopsisRule {
    /// Minimum character count for a candidate paragraph.
    pub min_len: usize,
    /// Inclusive Unicode range at least one character must fall into.
    pub script_range: Option<(char, char)>,
    /// Lowercase substrings that disqualify a paragraph (footer boilerplate).
    pub copyright_markers: Vec<String>,
}

impl SynopsisRule {
    /// Check whether `text` qualifies as a synopsis candidate.
    pub fn accepts(&self, text: &str) -> bool {
        let text = text.trim();
        if text.chars().count() < self.min_len {
            return false;
        }
        if let Some((lo, hi)) = self.script_range {
            if !text.chars().any(|c| c >= lo && c <= hi) {
                return false;
            }
        }
        let lowered = text.to_lowercase();
        !self
            .copyright_markers
            .iter()
            .any(|m| lowered.contains(m.as_str()))
    }
}

/// Everything the extraction engine needs to know about the target site.
///
/// Constructed once per process (or per test) and passed by reference;
/// there is no global state to mutate.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    /// Browser-impersonation headers. The site serves degraded pages to
    /// anything that looks like a bot.
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
    pub timeout_secs: u64,
    /// Default cap on how many listing entries get detail-fetched.
    pub max_results: usize,
    /// Path markers identifying movie detail pages.
    pub movie_paths: Vec<String>,
    /// Path markers identifying TV show / episode pages.
    pub tv_paths: Vec<String>,
    /// Lowercase keywords marking an anchor as a download/mirror link.
    pub download_keywords: Vec<String>,
    /// Domains whose links are share buttons, never downloads.
    pub share_domains: Vec<String>,
    pub synopsis: SynopsisRule,
}

impl SiteConfig {
    /// All content-bearing path markers, used by the fallback link scan.
    pub fn content_paths(&self) -> impl Iterator<Item = &str> {
        self.movie_paths
            .iter()
            .chain(self.tv_paths.iter())
            .map(String::as_str)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cinesubz.lk".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            referer: "https://www.google.com/".to_string(),
            timeout_secs: 15,
            max_results: 5,
            movie_paths: vec!["/movies/".to_string()],
            tv_paths: vec!["/tvshows/".to_string(), "/episodes/".to_string()],
            download_keywords: vec![
                "download".to_string(),
                "drive".to_string(),
                "mega".to_string(),
                "gofile".to_string(),
                "pixeldrain".to_string(),
                "mirror".to_string(),
            ],
            share_domains: vec![
                "facebook.com".to_string(),
                "twitter.com".to_string(),
                "instagram.com".to_string(),
                "pinterest.".to_string(),
                "whatsapp.com".to_string(),
                "wa.me".to_string(),
                "t.me/share".to_string(),
                "reddit.com".to_string(),
                "youtube.com".to_string(),
            ],
            synopsis: SynopsisRule {
                min_len: 60,
                // Sinhala block
                script_range: Some(('\u{0D80}', '\u{0DFF}')),
                copyright_markers: vec!["copyright".to_string(), "\u{00a9}".to_string()],
            },
        }
    }
}
