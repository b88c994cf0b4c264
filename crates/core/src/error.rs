//! Error types for fediscan operations.
//!
//! This module defines the main error type [`FediscanError`] which represents
//! the failures that can occur while fetching a post, parsing its markup,
//! or talking to the chat-completion API.
//!
//! Only the primary page fetch surfaces these errors to callers. Failures on
//! the status API fallback are absorbed by the extractor, and failures during
//! classification are folded into [`AnalysisResult::error`](crate::AnalysisResult).
//!
//! # Example
//!
//! ```rust
//! use fediscan_core::{FediscanError, Result};
//!
//! fn require_content(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(FediscanError::Config("no input text".to_string()));
//!     }
//!     Ok(text)
//! }
//! ```

use thiserror::Error;

/// Main error type for extraction and classification operations.
#[derive(Error, Debug)]
pub enum FediscanError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed, is missing a scheme, or has no host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The chat-completion API rejected the request or returned no choices.
    #[error("API error: {0}")]
    Api(String),

    /// A response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing or invalid configuration (API key, model name).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FediscanError.
pub type Result<T> = std::result::Result<T, FediscanError>;
