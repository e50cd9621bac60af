pub mod patterns;
pub mod rules;
pub mod suggestions;

use shared_types::{ComplianceResult, DocumentType};

pub use suggestions::{annotate, Annotation};

/// Default pass threshold: documents scoring below this are non-compliant
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

/// Engine tuning knobs
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Minimum score (0..=100) for a document to be considered valid
    pub pass_threshold: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

/// Rule-engine entry point
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceEngine {
    config: EngineConfig,
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate all applicable rules against extracted document text.
    ///
    /// Pure and synchronous. Total over all inputs: a malformed or empty
    /// document fails checks and scores low, it never errors.
    pub fn evaluate(&self, document_type: DocumentType, text: &str) -> ComplianceResult {
        let checks = rules::evaluate_rules(document_type, text);
        ComplianceResult::from_checks(checks, self.config.pass_threshold)
    }
}
