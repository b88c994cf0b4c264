use owo_colors::{OwoColorize, Style};

use crate::{AnalysisResult, PostRecord};

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

/// Configuration for the human-readable report
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Emit ANSI colors for the verdict line and headings
    pub colored: bool,
}

/// Formatter for the bannered text report
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &PostRecord, analysis: &AnalysisResult) -> String {
        convert_to_text(record, analysis, &self.config)
    }
}

/// Render a post and its verdict as a text report
pub fn convert_to_text(record: &PostRecord, analysis: &AnalysisResult, config: &TextConfig) -> String {
    let mut out = String::new();
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(RULE_WIDTH);

    out.push('\n');
    out.push_str(&banner);
    out.push('\n');
    out.push_str(&paint("FEDIVERSE POST ANALYSIS RESULTS", Style::new().bold(), config));
    out.push('\n');
    out.push_str(&banner);
    out.push('\n');

    out.push_str(&format!("\nPost URL: {}\n", or_na(&record.url)));
    out.push_str(&format!("Instance: {}\n", or_na(&record.instance)));
    out.push_str(&format!("Author: {}\n", or_na(&record.author)));
    if !record.timestamp.is_empty() {
        out.push_str(&format!("Posted: {}\n", record.timestamp));
    }

    out.push_str("\nContent:\n");
    out.push_str(&rule);
    out.push('\n');
    if record.content.is_empty() {
        out.push_str("No content extracted");
    } else {
        out.push_str(&record.content);
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    if let Some(error) = &analysis.error {
        out.push_str(&format!(
            "\n❌ {}\n",
            paint(&format!("Analysis Error: {}", error), Style::new().red(), config)
        ));
        return out;
    }

    let (icon, status, style) = if analysis.is_suspicious {
        ("🚨", "SUSPICIOUS", Style::new().red().bold())
    } else {
        ("✅", "APPEARS LEGITIMATE", Style::new().green().bold())
    };

    out.push_str(&format!("\n{} Status: {}\n", icon, paint(status, style, config)));
    out.push_str(&format!("Category: {}\n", analysis.category.as_str().to_uppercase()));
    out.push_str(&format!("Confidence: {}%\n", analysis.confidence));

    out.push_str("\nAnalysis:\n");
    if analysis.explanation.is_empty() {
        out.push_str("No explanation provided");
    } else {
        out.push_str(&analysis.explanation);
    }
    out.push('\n');

    if !analysis.red_flags.is_empty() {
        out.push_str(&format!("\n🚩 {}\n", paint("Red Flags Detected:", Style::new().yellow(), config)));
        for flag in &analysis.red_flags {
            out.push_str(&format!("  • {}\n", flag));
        }
    }

    if !analysis.recommendations.is_empty() {
        out.push_str(&format!("\n💡 {}\n", paint("Recommendations:", Style::new().cyan(), config)));
        out.push_str(&analysis.recommendations);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&banner);
    out.push('\n');

    out
}

fn paint(text: &str, style: Style, config: &TextConfig) -> String {
    if config.colored { text.style(style).to_string() } else { text.to_string() }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn record() -> PostRecord {
        PostRecord {
            url: "https://mastodon.social/@user/123".to_string(),
            content: "Win a free iPhone! DM your bank details.".to_string(),
            author: "Giveaway Bot".to_string(),
            instance: "mastodon.social".to_string(),
            timestamp: "2024-05-01T12:00:00Z".to_string(),
        }
    }

    fn verdict() -> AnalysisResult {
        AnalysisResult {
            is_suspicious: true,
            confidence: 88,
            category: Category::Scam,
            explanation: "Classic fake giveaway.".to_string(),
            red_flags: vec!["fake giveaway".to_string(), "asks for bank details".to_string()],
            recommendations: "Block and report.".to_string(),
            error: None,
        }
    }

    #[test]
    fn test_report_sections() {
        let text = convert_to_text(&record(), &verdict(), &TextConfig::default());

        assert!(text.contains("FEDIVERSE POST ANALYSIS RESULTS"));
        assert!(text.contains("Post URL: https://mastodon.social/@user/123"));
        assert!(text.contains("Instance: mastodon.social"));
        assert!(text.contains("Author: Giveaway Bot"));
        assert!(text.contains("Posted: 2024-05-01T12:00:00Z"));
        assert!(text.contains("Win a free iPhone!"));
        assert!(text.contains("🚨 Status: SUSPICIOUS"));
        assert!(text.contains("Category: SCAM"));
        assert!(text.contains("Confidence: 88%"));
        assert!(text.contains("  • fake giveaway\n"));
        assert!(text.contains("Block and report."));
        assert!(text.trim_end().ends_with(&"=".repeat(BANNER_WIDTH)));
    }

    #[test]
    fn test_report_legitimate() {
        let analysis = AnalysisResult {
            is_suspicious: false,
            category: Category::Legitimate,
            red_flags: Vec::new(),
            recommendations: String::new(),
            ..verdict()
        };
        let text = convert_to_text(&record(), &analysis, &TextConfig::default());

        assert!(text.contains("✅ Status: APPEARS LEGITIMATE"));
        assert!(!text.contains("Red Flags"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn test_report_error_section() {
        let analysis = AnalysisResult::failed("Analysis failed: boom", "Could not complete analysis due to API error");
        let text = convert_to_text(&record(), &analysis, &TextConfig::default());

        assert!(text.contains("❌ Analysis Error: Analysis failed: boom"));
        assert!(!text.contains("Status:"));
    }

    #[test]
    fn test_report_placeholders() {
        let text = convert_to_text(&PostRecord::default(), &verdict(), &TextConfig::default());

        assert!(text.contains("Post URL: N/A"));
        assert!(text.contains("Author: N/A"));
        assert!(text.contains("No content extracted"));
        assert!(!text.contains("Posted:"));
    }

    #[test]
    fn test_plain_output_has_no_ansi() {
        let text = convert_to_text(&record(), &verdict(), &TextConfig { colored: false });
        assert!(!text.contains('\u{1b}'));

        let colored = TextFormatter::new(TextConfig { colored: true }).convert(&record(), &verdict());
        assert!(colored.contains('\u{1b}'));
    }
}
