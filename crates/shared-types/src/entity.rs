//! Extracted-entity model
//!
//! Entities are produced by the external extraction step and consumed
//! read-only by the rule engine, suggestion generator and reconciler.

use serde::{Deserialize, Serialize};

/// Character offsets into the source text an entity was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Kind of fact an extractor recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Company,
    Person,
    Date,
    Amount,
    HsCode,
    Product,
    Location,
}

/// A single typed fact extracted from a document. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub value: String,
    /// Extractor confidence in [0, 1]
    pub confidence: f64,
    pub span: Span,
}

impl Entity {
    pub fn new(entity_type: EntityType, value: impl Into<String>, confidence: f64) -> Self {
        let value = value.into();
        let end = value.len();
        Self {
            entity_type,
            value,
            confidence,
            span: Span { start: 0, end },
        }
    }
}
