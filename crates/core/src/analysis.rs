//! Classification verdicts and model reply parsing.
//!
//! The model is asked for a JSON object but nothing forces it to comply, so
//! [`parse_reply`] degrades in three tiers:
//!
//! 1. a `{...}` span that decodes: fields are read one by one, missing keys
//!    keep their defaults, unknown keys are ignored
//! 2. no `{...}` span at all: keyword heuristic with fixed confidence
//! 3. a `{...}` span that does not decode: an error result carrying the raw reply

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// First `{` through last `}`, across lines.
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Verdict category reported by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Scam,
    Phishing,
    Legitimate,
    #[default]
    Unclear,
}

impl Category {
    /// Maps a model-supplied label to a category, case-insensitively.
    ///
    /// Anything unrecognised is `Unclear`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "scam" => Self::Scam,
            "phishing" => Self::Phishing,
            "legitimate" => Self::Legitimate,
            _ => Self::Unclear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scam => "scam",
            Self::Phishing => "phishing",
            Self::Legitimate => "legitimate",
            Self::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured verdict for one post.
///
/// When `error` is set the remaining fields are defaults and carry no verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub is_suspicious: bool,
    /// 0 to 100.
    pub confidence: u8,
    pub category: Category,
    pub explanation: String,
    pub red_flags: Vec<String>,
    pub recommendations: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// A result that carries only an error and an explanation.
    pub fn failed(error: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self { error: Some(error.into()), explanation: explanation.into(), ..Default::default() }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Populates a result from a decoded JSON object, field by field.
    ///
    /// Values of the wrong shape are coerced where the intent is clear
    /// (`"true"`, `"85"`, `85.4`) and otherwise left at their defaults.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut result = Self::default();

        if let Some(value) = object.get("is_suspicious").and_then(as_bool) {
            result.is_suspicious = value;
        }
        if let Some(value) = object.get("confidence").and_then(as_confidence) {
            result.confidence = value;
        }
        if let Some(label) = object.get("category").and_then(Value::as_str) {
            result.category = Category::from_label(label);
        }
        if let Some(text) = object.get("explanation").and_then(as_text) {
            result.explanation = text;
        }
        if let Some(flags) = object.get("red_flags") {
            result.red_flags = as_string_list(flags);
        }
        if let Some(text) = object.get("recommendations").and_then(as_text) {
            result.recommendations = text;
        }
        if let Some(text) = object.get("error").and_then(as_text) {
            result.error = Some(text);
        }

        result
    }

    /// Keyword verdict for replies that contain no JSON at all.
    pub fn heuristic(reply: &str) -> Self {
        let lowered = reply.to_lowercase();
        Self {
            is_suspicious: lowered.contains("suspicious") || lowered.contains("scam"),
            confidence: 50,
            category: Category::Unclear,
            explanation: reply.to_string(),
            red_flags: Vec::new(),
            recommendations: "Manual review recommended".to_string(),
            error: None,
        }
    }
}

/// Parses the model's raw reply into a verdict.
pub fn parse_reply(reply: &str) -> AnalysisResult {
    let Some(span) = JSON_SPAN.find(reply) else {
        tracing::debug!("reply has no JSON object, using keyword heuristic");
        return AnalysisResult::heuristic(reply);
    };

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(object)) => AnalysisResult::from_object(&object),
        Ok(_) | Err(_) => {
            tracing::debug!("reply JSON could not be decoded");
            AnalysisResult::failed("Could not parse analysis result", reply)
        }
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_confidence(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, 100.0) as u8)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        Value::Array(_) => Some(as_string_list(value).join("\n")),
        other => Some(other.to_string()),
    }
}

fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
