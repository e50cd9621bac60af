// Base rules applied to every document type
use super::Rule;
use crate::patterns;
use shared_types::Severity;

/// Minimum character count for a document to count as having content
pub const MIN_CONTENT_LEN: usize = 50;

pub static RULES: &[Rule] = &[
    Rule {
        name: "has_content",
        severity: Severity::Error,
        success_message: "Document contains extractable text",
        error_message: "Document text is empty or too short to analyze",
        predicate: has_content,
    },
    Rule {
        name: "has_date",
        severity: Severity::Warning,
        success_message: "Document contains a recognizable date",
        error_message: "No recognizable date found in document",
        predicate: has_date,
    },
];

fn has_content(text: &str) -> bool {
    text.trim().len() >= MIN_CONTENT_LEN
}

fn has_date(text: &str) -> bool {
    patterns::DATE_RE.is_match(text)
}
