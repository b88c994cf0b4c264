//! The extracted post record.

use serde::{Deserialize, Serialize};
use url::Url;

/// Fields extracted from a single Fediverse post.
///
/// An empty `content` means nothing could be extracted; the classifier
/// reports that instead of calling the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// The URL the post was requested from, as given.
    pub url: String,
    /// Plain-text body of the post.
    pub content: String,
    /// Display name of the author, may be empty.
    pub author: String,
    /// Host (and port, if any) of the instance serving the post.
    pub instance: String,
    /// Publication time, ISO-8601 when known.
    pub timestamp: String,
}

impl PostRecord {
    /// Creates an empty record for `url` with `instance` filled in.
    pub fn for_url(url: &Url, original: &str) -> Self {
        Self { url: original.to_string(), instance: instance_of(url), ..Default::default() }
    }

    /// Creates a record for text supplied directly rather than fetched.
    pub fn from_text(content: &str) -> Self {
        Self { content: content.trim().to_string(), ..Default::default() }
    }

    /// Returns true when there is content to classify.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Returns the first `max_chars` characters of the content.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

/// Returns the network location of `url`: host, plus `:port` when explicit.
pub fn instance_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
