//! Content fetching from URLs and stdin.
//!
//! This module owns the HTTP client used for post pages and the status API
//! fallback, plus the stdin reader used when the post body is piped in.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{FediscanError, Result};

/// HTTP client configuration for fetching post pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent sent with every page and status API request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, user_agent: "Mozilla/5.0 (compatible; MastodonAnalyzer/1.0)".to_string() }
    }
}

/// Builds the shared HTTP client for page and status API requests.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(FediscanError::HttpError)
}

/// Parses and validates a post URL.
///
/// The URL must be absolute, use http or https, and carry a host.
pub fn parse_post_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| FediscanError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FediscanError::InvalidUrl(format!(
            "{}: URL must use http:// or https://",
            url
        )));
    }

    if parsed.host_str().is_none() {
        return Err(FediscanError::InvalidUrl(format!("{}: URL has no host", url)));
    }

    Ok(parsed)
}

/// Fetches a page and returns its body as text.
///
/// Non-2xx responses are errors, as are timeouts and connection failures.
pub async fn fetch_page(client: &Client, url: &Url, config: &FetchConfig) -> Result<String> {
    let response = client
        .get(url.clone())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| classify_reqwest_error(e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FediscanError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    response.text().await.map_err(|e| classify_reqwest_error(e, config))
}

fn classify_reqwest_error(err: reqwest::Error, config: &FetchConfig) -> FediscanError {
    if err.is_timeout() { FediscanError::Timeout { timeout: config.timeout } } else { FediscanError::HttpError(err) }
}

/// Reads the post body from standard input.
///
/// This function reads all available input from stdin until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 10);
        assert!(config.user_agent.contains("MastodonAnalyzer"));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_post_url_valid() {
        let url = parse_post_url("https://mastodon.social/@user/123456789").unwrap();
        assert_eq!(url.host_str(), Some("mastodon.social"));
    }

    #[test]
    fn test_parse_post_url_missing_scheme() {
        let result = parse_post_url("mastodon.social/@user/1");
        assert!(matches!(result, Err(FediscanError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_post_url_rejects_other_schemes() {
        let result = parse_post_url("ftp://mastodon.social/@user/1");
        assert!(matches!(result, Err(FediscanError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_page_connection_refused() {
        let config = FetchConfig { timeout: 2, ..Default::default() };
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new().unwrap().block_on(async {
                let client = build_client(&config).unwrap();
                let url = parse_post_url("http://127.0.0.1:1/@user/1").unwrap();
                fetch_page(&client, &url, &config).await
            })
        })
        .join()
        .unwrap();

        assert!(matches!(
            result,
            Err(FediscanError::HttpError(_)) | Err(FediscanError::Timeout { .. })
        ));
    }
}
