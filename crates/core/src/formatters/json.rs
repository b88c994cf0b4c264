use serde::Serialize;

use crate::{AnalysisResult, FediscanError, PostRecord, Result};

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// The analyzed URL, empty for direct text input
    pub url: &'a str,
    /// Extracted post fields
    pub post_data: &'a PostRecord,
    /// Classification verdict
    pub analysis: &'a AnalysisResult,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Emit only the analysis object
    pub analysis_only: bool,
    /// Pretty print with 2-space indentation
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { analysis_only: false, pretty: true }
    }
}

/// Convert a post and its verdict to JSON
pub fn convert_to_json(record: &PostRecord, analysis: &AnalysisResult, config: &JsonConfig) -> Result<String> {
    if config.analysis_only {
        return to_json(analysis, config.pretty);
    }

    let report = JsonReport { url: &record.url, post_data: record, analysis };
    to_json(&report, config.pretty)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    json.map_err(|e| FediscanError::Parse(e.to_string()))
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &PostRecord, analysis: &AnalysisResult) -> Result<String> {
        convert_to_json(record, analysis, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use serde_json::Value;

    fn record() -> PostRecord {
        PostRecord {
            url: "https://mas.to/@someone/555666777".to_string(),
            content: "Hello".to_string(),
            author: "Someone".to_string(),
            instance: "mas.to".to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_full_report_shape() {
        let analysis = AnalysisResult { category: Category::Legitimate, confidence: 97, ..Default::default() };
        let json = convert_to_json(&record(), &analysis, &JsonConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["url"], "https://mas.to/@someone/555666777");
        assert_eq!(value["post_data"]["instance"], "mas.to");
        assert_eq!(value["post_data"]["author"], "Someone");
        assert_eq!(value["analysis"]["category"], "legitimate");
        assert_eq!(value["analysis"]["confidence"], 97);
        assert!(value["analysis"].get("error").is_none());
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let json = convert_to_json(&record(), &AnalysisResult::default(), &JsonConfig::default()).unwrap();
        assert!(json.starts_with("{\n  \"url\""));
    }

    #[test]
    fn test_analysis_only() {
        let analysis = AnalysisResult::failed("No content to analyze", "No content found in the post");
        let config = JsonConfig { analysis_only: true, pretty: false };
        let json = JsonFormatter::new(config).convert(&record(), &analysis).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("post_data").is_none());
        assert_eq!(value["error"], "No content to analyze");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_report_round_trips_analysis() {
        let analysis = AnalysisResult {
            is_suspicious: true,
            confidence: 60,
            category: Category::Scam,
            red_flags: vec!["urgency".to_string()],
            ..Default::default()
        };
        let json = convert_to_json(&record(), &analysis, &JsonConfig { analysis_only: true, pretty: true }).unwrap();
        let decoded: AnalysisResult = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, analysis);
    }
}
