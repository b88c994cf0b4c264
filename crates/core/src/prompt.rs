//! Prompt text sent to the model.

use crate::PostRecord;

/// System role framing for every classification request.
pub const SYSTEM_PROMPT: &str = "You are a cybersecurity expert specializing in identifying scams, phishing attempts, and fraudulent content on social media platforms.";

/// Builds the user prompt for `record`.
///
/// Content, author and instance are embedded verbatim.
pub fn build_prompt(record: &PostRecord) -> String {
    format!(
        r#"
Analyze the following social media post for potential scam, phishing, or fraudulent content:

POST CONTENT:
{content}

AUTHOR: {author}
INSTANCE: {instance}

Please analyze this post and determine if it appears to be:
1. A scam or fraudulent scheme
2. A phishing attempt
3. Legitimate content

Consider these factors:
- Urgency tactics ("act now", "limited time")
- Requests for personal information
- Suspicious links or promises
- Too-good-to-be-true offers
- Impersonation attempts
- Grammar and spelling issues
- Cryptocurrency or investment schemes
- Fake giveaways or contests

Respond in JSON format with:
{{
    "is_suspicious": boolean,
    "confidence": number (0-100),
    "category": "scam|phishing|legitimate|unclear",
    "explanation": "detailed explanation of your analysis",
    "red_flags": ["list", "of", "specific", "concerns"],
    "recommendations": "what users should do"
}}
"#,
        content = record.content,
        author = record.author,
        instance = record.instance,
    )
}
