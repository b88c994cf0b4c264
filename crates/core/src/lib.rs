pub mod analysis;
pub mod classify;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod llm;
pub mod parse;
pub mod post;
pub mod prompt;

pub use analysis::{AnalysisResult, Category, parse_reply};
pub use classify::{Classifier, ClassifierConfig, DEFAULT_MODEL};
pub use error::{FediscanError, Result};
pub use extract::{PostExtractor, extract_from_html, extract_post_id, parse_status_response, status_api_url};
pub use fetch::{FetchConfig, fetch_stdin};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, convert_to_json, convert_to_text};
pub use llm::{ChatBackend, ChatClient, ChatRequest, DEFAULT_BASE_URL, Message};
pub use parse::Document;
pub use post::PostRecord;
pub use prompt::{SYSTEM_PROMPT, build_prompt};
