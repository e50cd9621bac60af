//! Declarative rule tables, keyed by document type
//!
//! Every rule is a data descriptor with a pure text predicate; the engine
//! evaluates base rules first, then the document type's own table, in
//! declaration order. Predicates are total: they never panic and an empty
//! document simply fails checks.

pub mod base;
pub mod bill_of_entry;
pub mod invoice;
pub mod packing_list;

use shared_types::{DocumentType, Severity, ValidationCheck};

/// A single declarative validation rule
pub struct Rule {
    pub name: &'static str,
    pub severity: Severity,
    pub success_message: &'static str,
    pub error_message: &'static str,
    pub predicate: fn(&str) -> bool,
}

impl Rule {
    fn check(&self, text: &str) -> ValidationCheck {
        let passed = (self.predicate)(text);
        ValidationCheck {
            name: self.name.to_string(),
            passed,
            message: if passed {
                self.success_message.to_string()
            } else {
                self.error_message.to_string()
            },
            severity: self.severity,
        }
    }
}

/// Type-specific rules layered on top of the base set.
/// Unrecognized document types get no extra rules.
pub fn type_rules(document_type: DocumentType) -> &'static [Rule] {
    match document_type {
        DocumentType::Invoice => invoice::RULES,
        DocumentType::BillOfEntry => bill_of_entry::RULES,
        DocumentType::PackingList => packing_list::RULES,
        DocumentType::Unknown => &[],
    }
}

/// Evaluate base + type-specific rules in declaration order, one check per rule
pub fn evaluate_rules(document_type: DocumentType, text: &str) -> Vec<ValidationCheck> {
    base::RULES
        .iter()
        .chain(type_rules(document_type).iter())
        .map(|rule| rule.check(text))
        .collect()
}
