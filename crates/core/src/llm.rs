//! Chat-completion client for OpenAI-compatible APIs.
//!
//! The classifier talks to the model through the [`ChatBackend`] trait.
//! [`ChatClient`] is the HTTP implementation and targets OpenRouter by
//! default; any endpoint speaking the `/chat/completions` protocol works.

use std::future::Future;
use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{FediscanError, Result};

/// Default API base for chat completions.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. `openai/gpt-oss-20b:free`
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into(), messages: Vec::new(), temperature: None, max_tokens: None }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// Something that can answer a chat request with the model's text reply.
pub trait ChatBackend {
    /// Sends `request` and returns the first choice's message content.
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP chat-completion client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    /// Creates a client for the default base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FediscanError::Config`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FediscanError::Config("API key is empty".to_string()));
        }

        Ok(Self { http_client: Client::new(), api_key, base_url: DEFAULT_BASE_URL.to_string() })
    }

    /// Sets a custom base URL (proxies, self-hosted gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ChatBackend for ChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat completion request failed");
                FediscanError::HttpError(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "chat completion API error");
            return Err(FediscanError::Api(format!("{}: {}", status, error_text.trim())));
        }

        let raw: ChatResponseRaw = response.json().await.map_err(|e| FediscanError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| FediscanError::Api("response contained no choices".to_string()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            reply_chars = content.chars().count(),
            "chat completion"
        );

        Ok(content)
    }
}
