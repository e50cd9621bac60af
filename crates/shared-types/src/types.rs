use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Document categories the compliance pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    BillOfEntry,
    PackingList,
    /// Unrecognized types still get the base rule set
    Unknown,
}

impl DocumentType {
    /// Parse from an API string (case-insensitive)
    pub fn parse_code(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "invoice" | "commercial_invoice" => DocumentType::Invoice,
            "bill_of_entry" | "boe" => DocumentType::BillOfEntry,
            "packing_list" => DocumentType::PackingList,
            _ => DocumentType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "Commercial Invoice",
            DocumentType::BillOfEntry => "Bill of Entry",
            DocumentType::PackingList => "Packing List",
            DocumentType::Unknown => "Unknown",
        }
    }
}

/// Severity attached to a validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Outcome of one rule evaluation, in rule-declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
}

/// Result of evaluating all applicable rules against one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub is_valid: bool,
    /// Percentage of applicable rules passed, 0..=100
    pub score: u8,
    pub checks: Vec<ValidationCheck>,
}

impl ComplianceResult {
    /// Aggregate checks into a score and verdict.
    ///
    /// `score = round(100 * passed / total)`; an empty check list scores 0
    /// and is never valid.
    pub fn from_checks(checks: Vec<ValidationCheck>, pass_threshold: u8) -> Self {
        let total = checks.len();
        let passed = checks.iter().filter(|c| c.passed).count();
        let score = if total == 0 {
            0
        } else {
            ((100.0 * passed as f64) / total as f64).round() as u8
        };
        Self {
            is_valid: total > 0 && score >= pass_threshold,
            score,
            checks,
        }
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Remediation priority for a correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Mirrors a failed validation check for display alongside the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the failed check
    pub field: String,
    pub message: String,
    pub severity: Severity,
    /// Remediation hint where one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A concrete, prioritized fix the user can apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub field: String,
    pub message: String,
    pub priority: Priority,
    /// Example of the expected format, where available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Lifecycle status reported by the processing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl JobStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// Position in the lifecycle; snapshots may repeat but never regress
    fn rank(&self) -> u8 {
        match self {
            JobStatus::Uploading => 0,
            JobStatus::Processing => 1,
            JobStatus::Completed | JobStatus::Error => 2,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Uploading => write!(f, "uploading"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Error => write!(f, "error"),
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Uploading
    }
}

/// Per-document tracking record, owned exclusively by one polling session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentJob {
    pub id: String,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_poll_at: Option<DateTime<Utc>>,
    pub attempts: u32,
}

impl DocumentJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Uploading,
            submitted_at: Utc::now(),
            terminal_at: None,
            last_poll_at: None,
            attempts: 0,
        }
    }

    /// Record one poll of the status oracle
    pub fn record_poll(&mut self) {
        self.attempts += 1;
        self.last_poll_at = Some(Utc::now());
    }

    /// Apply an observed status snapshot.
    ///
    /// Observation is monotone: repeated or out-of-order statuses are
    /// tolerated without regressing, and a terminal status is final.
    /// Returns true if the stored status changed.
    pub fn observe(&mut self, status: JobStatus) -> bool {
        if self.status.is_terminal() || status.rank() <= self.status.rank() {
            return false;
        }
        self.status = status;
        if status.is_terminal() {
            self.terminal_at = Some(Utc::now());
        }
        true
    }
}

/// Reply from the status oracle for one poll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_fields: Option<StructuredFields>,
    /// Failure reason accompanying an `error` status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The canonical structured-extraction schema both invoice and Bill of
/// Entry agree on. Absent fields surface as `missing` in reconciliation,
/// never silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consignee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_of_loading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_of_discharge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
}

/// Terminal payload of a successfully processed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub fields: StructuredFields,
}

/// Classification of one compared field pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Match,
    Mismatch,
    Missing,
}

/// One field of the invoice/BOE diff report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldComparison {
    pub field: String,
    pub invoice_value: String,
    pub reference_value: String,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregate verdict of a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Passed,
    Warning,
    Failed,
}

/// Full invoice vs Bill of Entry comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoeComparison {
    pub invoice_number: String,
    pub reference_number: String,
    /// Percentage of compared fields that matched, 0..=100
    pub match_percentage: u8,
    pub overall_status: OverallStatus,
    pub results: Vec<FieldComparison>,
}
