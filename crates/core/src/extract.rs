//! Post extraction from Fediverse pages.
//!
//! Extraction is a chain of ordered fallbacks, each evaluated with early exit:
//!
//! 1. content selectors against the page markup
//! 2. author selectors, independently
//! 3. the `og:description` meta tag
//! 4. the Mastodon status API, keyed by the numeric id found in the URL
//!
//! Only the initial page fetch can fail the extraction. Every later step
//! either produces fields or produces nothing.

use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::fetch::{FetchConfig, build_client, fetch_page, parse_post_url};
use crate::parse::{Document, html_to_text};
use crate::{FediscanError, PostRecord, Result};

/// Selectors for the post body, most specific first.
pub const CONTENT_SELECTORS: [&str; 7] = [
    ".status__content",
    ".detailed-status__wrapper .status__content",
    "[data-testid=\"status-content\"]",
    ".post-content",
    ".toot-content",
    "article .content",
    ".status-content",
];

/// Selectors for the author's display name, most specific first.
pub const AUTHOR_SELECTORS: [&str; 5] = [
    ".status__display-name strong",
    ".detailed-status__display-name strong",
    ".display-name__account",
    ".author-name",
    ".username",
];

/// Patterns locating the numeric post id in a URL, in priority order.
static POST_ID_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"/statuses/(\d+)").unwrap(),
        Regex::new(r"/@[^/]+/(\d+)").unwrap(),
        Regex::new(r"/posts/(\d+)").unwrap(),
        Regex::new(r"/status/(\d+)").unwrap(),
    ]
});

/// Fetches post pages and extracts a [`PostRecord`] from them.
///
/// # Example
///
/// ```rust,no_run
/// use fediscan_core::{FetchConfig, PostExtractor};
///
/// # async fn run() -> fediscan_core::Result<()> {
/// let extractor = PostExtractor::new(FetchConfig::default())?;
/// let record = extractor.extract("https://mastodon.social/@user/123456789").await?;
/// println!("{}: {}", record.author, record.content);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostExtractor {
    client: Client,
    config: FetchConfig,
}

impl PostExtractor {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Extracts a post from `url`.
    ///
    /// # Errors
    ///
    /// Fails when the URL is invalid or the page itself cannot be fetched
    /// (connection error, timeout, non-2xx status). A page that yields no
    /// content is not an error: the returned record has empty `content`.
    ///
    /// When the status API fallback yields nothing, the page record is
    /// returned as is, so an author found in the markup survives even though
    /// `content` stays empty.
    pub async fn extract(&self, url: &str) -> Result<PostRecord> {
        let parsed = parse_post_url(url)?;

        let start = Instant::now();
        let html = fetch_page(&self.client, &parsed, &self.config).await?;
        debug!(url, bytes = html.len(), duration_ms = start.elapsed().as_millis(), "fetched post page");

        let record = extract_from_html(&html, url)?;
        if record.has_content() {
            return Ok(record);
        }

        debug!(url, "no content in page markup, trying status API");
        Ok(self.fetch_status(url).await.unwrap_or(record))
    }

    /// Looks the post up through the Mastodon status API.
    ///
    /// Returns `None` on any failure so the caller keeps what it already has.
    async fn fetch_status(&self, url: &str) -> Option<PostRecord> {
        let api_url = status_api_url(url)?;

        let response = match self.client.get(&api_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(api_url, error = %e, "status API request failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(api_url, status = %response.status(), "status API returned non-200");
            return None;
        }

        let body = response.text().await.ok()?;
        match parse_status_response(&body, url) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(api_url, error = %e, "status API body could not be decoded");
                None
            }
        }
    }
}

/// Extracts post fields from a page's HTML.
///
/// Content and author come from independent selector chains; content falls
/// back to `og:description`. `instance` always comes from `url`.
pub fn extract_from_html(html: &str, url: &str) -> Result<PostRecord> {
    let parsed = parse_post_url(url)?;
    let doc = Document::parse(html)?;
    let mut record = PostRecord::for_url(&parsed, url);

    if let Some(el) = doc.first_match(&CONTENT_SELECTORS) {
        record.content = el.text();
    }

    if let Some(el) = doc.first_match(&AUTHOR_SELECTORS) {
        record.author = el.text();
    }

    if record.content.is_empty()
        && let Some(description) = doc.meta_content("og:description")
    {
        debug!("using og:description as content");
        record.content = description;
    }

    record.timestamp = extract_timestamp(&doc).unwrap_or_default();

    Ok(record)
}

/// Timestamp from `<time datetime>`, else `article:published_time`.
fn extract_timestamp(doc: &Document) -> Option<String> {
    if let Ok(Some(el)) = doc.select_first("time[datetime]")
        && let Some(datetime) = el.attr("datetime")
    {
        let datetime = datetime.trim();
        if !datetime.is_empty() {
            return Some(datetime.to_string());
        }
    }

    doc.meta_content("article:published_time").filter(|s| !s.is_empty())
}

/// Extracts the numeric post id from a URL.
///
/// Patterns are tried in order: `/statuses/<id>`, `/@user/<id>`,
/// `/posts/<id>`, `/status/<id>`.
pub fn extract_post_id(url: &str) -> Option<&str> {
    POST_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Builds the status API endpoint for the post at `url`.
///
/// Returns `None` when the URL is invalid or carries no post id.
pub fn status_api_url(url: &str) -> Option<String> {
    let parsed = parse_post_url(url).ok()?;
    let id = extract_post_id(url)?;
    let instance = crate::post::instance_of(&parsed);
    Some(format!("https://{}/api/v1/statuses/{}", instance, id))
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    content: Option<String>,
    account: Option<StatusAccount>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusAccount {
    display_name: Option<String>,
    acct: Option<String>,
}

/// Builds a record from a status API JSON body.
///
/// `content` is HTML and goes through the same text extraction as page
/// markup. An empty display name falls back to the account handle.
pub fn parse_status_response(body: &str, url: &str) -> Result<PostRecord> {
    let parsed = parse_post_url(url)?;
    let status: StatusResponse = serde_json::from_str(body).map_err(|e| FediscanError::Parse(e.to_string()))?;

    let author = status
        .account
        .map(|account| {
            let display_name = account.display_name.unwrap_or_default();
            if display_name.trim().is_empty() { account.acct.unwrap_or_default() } else { display_name }
        })
        .unwrap_or_default();

    Ok(PostRecord {
        content: html_to_text(status.content.as_deref().unwrap_or_default()),
        author: author.trim().to_string(),
        timestamp: status.created_at.unwrap_or_default(),
        ..PostRecord::for_url(&parsed, url)
    })
}
