//! Derives prioritized remediation items from failed checks and entities
//!
//! Strictly a read-only annotator over a [`ComplianceResult`]: it mirrors
//! failed checks as validation errors and adds concrete corrections where a
//! domain remediation is known, plus suggestions derived from the extracted
//! entities alone.

use serde::{Deserialize, Serialize};
use shared_types::{
    ComplianceResult, Correction, DocumentType, Entity, EntityType, Priority, Severity,
    ValidationCheck, ValidationError,
};

use crate::patterns;

/// Text shorter than this suggests a truncated upload or partial scan
pub const MIN_COMPLETE_TEXT_LEN: usize = 200;

/// Output of the annotator: errors mirror failed checks, corrections are
/// actionable fixes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub errors: Vec<ValidationError>,
    pub corrections: Vec<Correction>,
}

/// Annotate a compliance result with remediation guidance
pub fn annotate(
    text: &str,
    document_type: DocumentType,
    entities: &[Entity],
    result: &ComplianceResult,
) -> Annotation {
    let mut errors = Vec::new();
    let mut corrections = Vec::new();

    for check in result.failed_checks() {
        errors.push(ValidationError {
            field: check.name.clone(),
            message: check.message.clone(),
            severity: check.severity,
            hint: remediation_hint(&check.name).map(str::to_string),
        });
        if let Some(correction) = correction_for(check) {
            corrections.push(correction);
        }
    }

    corrections.extend(entity_suggestions(text, document_type, entities));

    Annotation {
        errors,
        corrections,
    }
}

/// Suggestions derived purely from entities and text, independent of rule
/// failures
fn entity_suggestions(
    text: &str,
    document_type: DocumentType,
    entities: &[Entity],
) -> Vec<Correction> {
    let mut corrections = Vec::new();

    let has_product = entities
        .iter()
        .any(|e| e.entity_type == EntityType::Product);
    let has_hs_code = entities.iter().any(|e| e.entity_type == EntityType::HsCode);
    if has_product && !has_hs_code {
        corrections.push(Correction {
            field: "hs_code".to_string(),
            message: "Products detected without an HS classification; look up the \
                      Harmonized System code for each line item"
                .to_string(),
            priority: Priority::High,
            example: Some("8471.30.10".to_string()),
        });
    }

    if text.trim().len() < MIN_COMPLETE_TEXT_LEN {
        corrections.push(Correction {
            field: "document".to_string(),
            message: "Extracted text is unusually short; the document may be \
                      incomplete or partially scanned"
                .to_string(),
            priority: Priority::Medium,
            example: None,
        });
    }

    if document_type == DocumentType::Invoice && !patterns::contains_any(text, patterns::GST_KEYWORDS)
    {
        corrections.push(Correction {
            field: "gstin".to_string(),
            message: "No GST registration marker found; add the exporter's GSTIN".to_string(),
            priority: Priority::Medium,
            example: Some("GSTIN: 22AAAAA0000A1Z5".to_string()),
        });
    }

    corrections
}

fn priority_for(severity: Severity) -> Priority {
    match severity {
        Severity::Error => Priority::High,
        Severity::Warning => Priority::Medium,
        Severity::Info => Priority::Low,
    }
}

/// Short hint shown next to a failed check, where one is known
fn remediation_hint(check_name: &str) -> Option<&'static str> {
    match check_name {
        "has_content" => Some("Re-scan or re-upload the document at a higher quality"),
        "has_date" => Some("Add the document date, e.g. 15/01/2024"),
        "invoice_number" => Some("Add a unique invoice reference, e.g. INV-2024-001"),
        "currency_amount" => Some("State the total with its currency, e.g. USD 1,250.00"),
        "party_identification" => Some("Name the buyer, seller and consignee"),
        "customs_declaration" => Some("Include the customs declaration and duty details"),
        "hs_code" => Some("Add the HS classification in NNNN.NN.NN form"),
        _ => None,
    }
}

/// Concrete correction with an expected-format example, for checks that
/// have a known domain fix
fn correction_for(check: &ValidationCheck) -> Option<Correction> {
    let (message, example) = match check.name.as_str() {
        "invoice_number" => (
            "Add an invoice number to the document header",
            Some("INV-2024-001"),
        ),
        "currency_amount" => (
            "State the invoice total with an explicit currency",
            Some("USD 1,250.00"),
        ),
        "hs_code" => (
            "Add the Harmonized System code for the declared goods",
            Some("8471.30.10"),
        ),
        "has_date" => ("Add the document issue date", Some("15/01/2024")),
        "customs_declaration" => (
            "Include customs declaration details (duty, assessable value)",
            None,
        ),
        _ => return None,
    };
    Some(Correction {
        field: check.name.clone(),
        message: message.to_string(),
        priority: priority_for(check.severity),
        example: example.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComplianceEngine;
    use shared_types::Span;

    fn entity(entity_type: EntityType, value: &str) -> Entity {
        Entity {
            entity_type,
            value: value.to_string(),
            confidence: 0.9,
            span: Span { start: 0, end: value.len() },
        }
    }

    #[test]
    fn test_every_failed_check_yields_an_error() {
        let engine = ComplianceEngine::new();
        let result = engine.evaluate(DocumentType::Invoice, "");
        let annotation = annotate("", DocumentType::Invoice, &[], &result);

        assert_eq!(
            annotation.errors.len(),
            result.failed_checks().count()
        );
        assert!(annotation
            .errors
            .iter()
            .any(|e| e.field == "invoice_number" && e.hint.is_some()));
    }

    #[test]
    fn test_missing_invoice_number_gets_format_example() {
        let engine = ComplianceEngine::new();
        let result = engine.evaluate(DocumentType::Invoice, "no useful content");
        let annotation = annotate("no useful content", DocumentType::Invoice, &[], &result);

        let correction = annotation
            .corrections
            .iter()
            .find(|c| c.field == "invoice_number")
            .expect("invoice_number correction");
        assert_eq!(correction.priority, Priority::High);
        assert_eq!(correction.example.as_deref(), Some("INV-2024-001"));
    }

    #[test]
    fn test_products_without_hs_code_is_high_priority() {
        let engine = ComplianceEngine::new();
        let text = "Invoice Number: INV-001 dated 15/01/2024, total USD 900.00, \
                    Buyer: ABC Imports LLC, consignee of record. Goods: laptops. \
                    GSTIN: 22AAAAA0000A1Z5. Packed in export cartons, net weight 40 kg.";
        let result = engine.evaluate(DocumentType::Invoice, text);
        assert!(result.is_valid);

        let entities = vec![entity(EntityType::Product, "laptops")];
        let annotation = annotate(text, DocumentType::Invoice, &entities, &result);

        let hs = annotation
            .corrections
            .iter()
            .find(|c| c.field == "hs_code")
            .expect("hs_code suggestion");
        assert_eq!(hs.priority, Priority::High);

        // An hs_code entity silences the suggestion
        let entities = vec![
            entity(EntityType::Product, "laptops"),
            entity(EntityType::HsCode, "8471.30.10"),
        ];
        let annotation = annotate(text, DocumentType::Invoice, &entities, &result);
        assert!(annotation.corrections.iter().all(|c| c.field != "hs_code"));
    }

    #[test]
    fn test_short_text_suggests_incomplete_document() {
        let engine = ComplianceEngine::new();
        let result = engine.evaluate(DocumentType::PackingList, "short");
        let annotation = annotate("short", DocumentType::PackingList, &[], &result);

        assert!(annotation
            .corrections
            .iter()
            .any(|c| c.field == "document" && c.priority == Priority::Medium));
    }

    #[test]
    fn test_invoice_without_gst_marker_gets_gstin_suggestion() {
        let engine = ComplianceEngine::new();
        let text = "Invoice Number: INV-001 dated 15/01/2024, $100.00, Buyer: X";
        let result = engine.evaluate(DocumentType::Invoice, text);
        let annotation = annotate(text, DocumentType::Invoice, &[], &result);

        assert!(annotation.corrections.iter().any(|c| c.field == "gstin"));

        // Non-invoice documents never get the GSTIN suggestion
        let result = engine.evaluate(DocumentType::BillOfEntry, text);
        let annotation = annotate(text, DocumentType::BillOfEntry, &[], &result);
        assert!(annotation.corrections.iter().all(|c| c.field != "gstin"));
    }
}
