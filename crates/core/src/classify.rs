//! Scam and phishing classification of extracted posts.

use tracing::{debug, warn};

use crate::analysis::parse_reply;
use crate::llm::{ChatBackend, ChatRequest, Message};
use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::{AnalysisResult, PostRecord};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

/// Sampling and model settings for classification requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.to_string(), temperature: 0.1, max_tokens: 1000 }
    }
}

/// Classifies posts with a chat model.
///
/// Classification never fails: transport and parse problems are reported
/// through [`AnalysisResult::error`].
#[derive(Debug, Clone)]
pub struct Classifier<B> {
    backend: B,
    config: ClassifierConfig,
}

impl<B: ChatBackend> Classifier<B> {
    pub fn new(backend: B, config: ClassifierConfig) -> Self {
        Self { backend, config }
    }

    /// Builds the request that [`classify`](Self::classify) sends for `record`.
    pub fn request_for(&self, record: &PostRecord) -> ChatRequest {
        ChatRequest::new(self.config.model.clone())
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(build_prompt(record)))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
    }

    /// Classifies `record`.
    ///
    /// An empty `content` short-circuits without contacting the backend.
    pub async fn classify(&self, record: &PostRecord) -> AnalysisResult {
        if !record.has_content() {
            debug!(url = %record.url, "nothing to classify");
            return AnalysisResult::failed("No content to analyze", "No content found in the post");
        }

        let request = self.request_for(record);
        match self.backend.complete(&request).await {
            Ok(reply) => parse_reply(&reply),
            Err(e) => {
                warn!(model = %self.config.model, error = %e, "classification request failed");
                AnalysisResult::failed(
                    format!("Analysis failed: {}", e),
                    "Could not complete analysis due to API error",
                )
            }
        }
    }
}
