pub mod entity;
pub mod types;

pub use entity::{Entity, EntityType, Span};
pub use types::{
    BoeComparison, ComplianceResult, Correction, DocumentJob, DocumentType, ExtractedDocument,
    FieldComparison, JobStatus, MatchStatus, OverallStatus, Priority, Severity, StatusSnapshot,
    StructuredFields, ValidationCheck, ValidationError,
};
