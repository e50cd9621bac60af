//! Cross-document reconciliation: commercial invoice vs Bill of Entry
//!
//! A pure function of two already-finalized structured extractions. Every
//! canonical field is classified as match / mismatch / missing, amounts get
//! a signed variance, and the aggregate carries a match percentage and an
//! overall verdict. Callers only hand this terminal-success extractions;
//! the lifecycle layer guarantees that by construction.

pub mod amount;
pub mod fields;
pub mod normalize;

use shared_types::{BoeComparison, FieldComparison, MatchStatus, OverallStatus, StructuredFields};

use crate::amount::{format_variance, parse_amount};
use crate::fields::{CanonicalField, FieldKind};

/// Amounts closer than half a cent compare equal
const AMOUNT_EPSILON: f64 = 0.005;

/// Reconcile an invoice extraction against its Bill of Entry
pub fn reconcile(invoice: &StructuredFields, reference: &StructuredFields) -> BoeComparison {
    let results: Vec<FieldComparison> = CanonicalField::ALL
        .iter()
        .map(|field| compare_field(*field, invoice, reference))
        .collect();

    let matches = results
        .iter()
        .filter(|r| r.status == MatchStatus::Match)
        .count();
    let match_percentage = ((100.0 * matches as f64) / results.len() as f64).round() as u8;

    let required_missing = CanonicalField::ALL
        .iter()
        .zip(&results)
        .any(|(field, result)| field.required() && result.status == MatchStatus::Missing);
    let any_mismatch = results.iter().any(|r| r.status == MatchStatus::Mismatch);

    let overall_status = if required_missing {
        OverallStatus::Failed
    } else if any_mismatch {
        OverallStatus::Warning
    } else {
        OverallStatus::Passed
    };

    BoeComparison {
        invoice_number: value_of(CanonicalField::InvoiceNumber, invoice),
        reference_number: value_of(CanonicalField::InvoiceNumber, reference),
        match_percentage,
        overall_status,
        results,
    }
}

fn value_of(field: CanonicalField, fields: &StructuredFields) -> String {
    field.get(fields).unwrap_or_default().to_string()
}

fn compare_field(
    field: CanonicalField,
    invoice: &StructuredFields,
    reference: &StructuredFields,
) -> FieldComparison {
    let invoice_value = field.get(invoice);
    let reference_value = field.get(reference);

    let missing = |side: &str| {
        (
            MatchStatus::Missing,
            None,
            Some(format!("Add {} to {}", field.label(), side)),
        )
    };
    let (status, variance, suggestion) = match (invoice_value, reference_value) {
        (Some(inv), Some(reference)) => classify(field, inv, reference),
        (None, None) => missing("both documents"),
        (None, Some(_)) => missing("the invoice"),
        (Some(_), None) => missing("the Bill of Entry"),
    };

    FieldComparison {
        field: field.name().to_string(),
        invoice_value: invoice_value.unwrap_or_default().to_string(),
        reference_value: reference_value.unwrap_or_default().to_string(),
        status,
        variance,
        suggestion,
    }
}

fn classify(
    field: CanonicalField,
    invoice_value: &str,
    reference_value: &str,
) -> (MatchStatus, Option<String>, Option<String>) {
    match field.kind() {
        FieldKind::Amount => classify_amount(invoice_value, reference_value),
        FieldKind::HsCode => classify_hs_code(field, invoice_value, reference_value),
        FieldKind::Company => classify_normalized(
            field,
            normalize::normalize_company(invoice_value),
            normalize::normalize_company(reference_value),
        ),
        FieldKind::Port => classify_normalized(
            field,
            normalize::normalize_port(invoice_value),
            normalize::normalize_port(reference_value),
        ),
        FieldKind::Date => classify_normalized(
            field,
            normalize::normalize_date(invoice_value),
            normalize::normalize_date(reference_value),
        ),
        FieldKind::Text => classify_normalized(
            field,
            normalize::normalize_text(invoice_value),
            normalize::normalize_text(reference_value),
        ),
    }
}

fn classify_normalized(
    field: CanonicalField,
    invoice_value: String,
    reference_value: String,
) -> (MatchStatus, Option<String>, Option<String>) {
    if invoice_value == reference_value {
        (MatchStatus::Match, None, None)
    } else {
        (
            MatchStatus::Mismatch,
            None,
            Some(format!(
                "{} disagrees between the documents; confirm which value is correct",
                capitalize(field.label())
            )),
        )
    }
}

fn classify_amount(
    invoice_value: &str,
    reference_value: &str,
) -> (MatchStatus, Option<String>, Option<String>) {
    match (parse_amount(invoice_value), parse_amount(reference_value)) {
        (Some(inv), Some(reference)) => {
            if let (Some(a), Some(b)) = (&inv.currency, &reference.currency) {
                if a != b {
                    return (
                        MatchStatus::Mismatch,
                        None,
                        Some(format!(
                            "Currencies differ ({} vs {}); confirm the settlement currency",
                            a, b
                        )),
                    );
                }
            }
            let diff = reference.value - inv.value;
            if diff.abs() <= AMOUNT_EPSILON {
                (MatchStatus::Match, None, None)
            } else {
                let currency = reference.currency.as_deref().or(inv.currency.as_deref());
                (
                    MatchStatus::Mismatch,
                    Some(format_variance(diff, currency)),
                    Some("Amounts differ; verify the total value calculation".to_string()),
                )
            }
        }
        (Some(_), None) => (
            MatchStatus::Mismatch,
            None,
            Some("The invoice holds a readable amount; correct the Bill of Entry value".to_string()),
        ),
        (None, Some(_)) => (
            MatchStatus::Mismatch,
            None,
            Some("The Bill of Entry holds a readable amount; correct the invoice value".to_string()),
        ),
        (None, None) => classify_normalized(
            CanonicalField::TotalValue,
            normalize::normalize_text(invoice_value),
            normalize::normalize_text(reference_value),
        ),
    }
}

fn classify_hs_code(
    field: CanonicalField,
    invoice_value: &str,
    reference_value: &str,
) -> (MatchStatus, Option<String>, Option<String>) {
    let invoice_norm = normalize::normalize_text(invoice_value);
    let reference_norm = normalize::normalize_text(reference_value);
    if invoice_norm == reference_norm {
        return (MatchStatus::Match, None, None);
    }

    let invoice_valid = is_hs_shape(&invoice_norm);
    let reference_valid = is_hs_shape(&reference_norm);
    let suggestion = match (invoice_valid, reference_valid) {
        (true, false) => {
            "The invoice HS code appears correctly formatted; update the Bill of Entry".to_string()
        }
        (false, true) => {
            "The Bill of Entry HS code appears correctly formatted; update the invoice".to_string()
        }
        _ => format!(
            "{} disagrees between the documents; confirm the tariff classification",
            capitalize(field.label())
        ),
    };
    (MatchStatus::Mismatch, None, Some(suggestion))
}

fn is_hs_shape(value: &str) -> bool {
    lazy_static::lazy_static! {
        static ref HS_SHAPE_RE: regex::Regex =
            regex::Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").unwrap();
    }
    HS_SHAPE_RE.is_match(value)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_fields() -> StructuredFields {
        StructuredFields {
            invoice_number: Some("INV-001".to_string()),
            invoice_date: Some("15/01/2024".to_string()),
            exporter_name: Some("ABC Exports Pvt. Ltd.".to_string()),
            consignee_name: Some("XYZ Imports LLC".to_string()),
            total_value: Some("USD 25,487.50".to_string()),
            port_of_loading: Some("Mumbai".to_string()),
            port_of_discharge: Some("New York".to_string()),
            hs_code: Some("8471.30.10".to_string()),
            country_of_origin: Some("India".to_string()),
        }
    }

    fn field_result<'a>(comparison: &'a BoeComparison, name: &str) -> &'a FieldComparison {
        comparison
            .results
            .iter()
            .find(|r| r.field == name)
            .unwrap_or_else(|| panic!("no result for {}", name))
    }

    #[test]
    fn test_identical_documents_pass_at_100() {
        let comparison = reconcile(&full_fields(), &full_fields());
        assert_eq!(comparison.match_percentage, 100);
        assert_eq!(comparison.overall_status, OverallStatus::Passed);
        assert!(comparison
            .results
            .iter()
            .all(|r| r.status == MatchStatus::Match));
    }

    #[test]
    fn test_amount_mismatch_carries_signed_variance() {
        let invoice = full_fields();
        let reference = StructuredFields {
            total_value: Some("USD 25,500.00".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&invoice, &reference);

        let total = field_result(&comparison, "total_value");
        assert_eq!(total.status, MatchStatus::Mismatch);
        assert_eq!(total.variance.as_deref(), Some("+$12.50"));
        assert!(total.suggestion.as_deref().unwrap().contains("verify"));
        assert_eq!(comparison.overall_status, OverallStatus::Warning);
    }

    #[test]
    fn test_missing_country_of_origin_fails_overall() {
        let invoice = StructuredFields {
            country_of_origin: None,
            ..full_fields()
        };
        let comparison = reconcile(&invoice, &full_fields());

        let origin = field_result(&comparison, "country_of_origin");
        assert_eq!(origin.status, MatchStatus::Missing);
        assert!(origin
            .suggestion
            .as_deref()
            .unwrap()
            .contains("country of origin"));
        assert_eq!(comparison.overall_status, OverallStatus::Failed);
        assert!(comparison.match_percentage < 100);
    }

    #[test]
    fn test_missing_optional_port_does_not_fail() {
        let invoice = StructuredFields {
            port_of_loading: None,
            ..full_fields()
        };
        let comparison = reconcile(&invoice, &full_fields());

        assert_eq!(
            field_result(&comparison, "port_of_loading").status,
            MatchStatus::Missing
        );
        assert_eq!(comparison.overall_status, OverallStatus::Passed);
        assert_eq!(comparison.match_percentage, 89); // 8 of 9
    }

    #[test]
    fn test_port_code_matches_port_name() {
        let reference = StructuredFields {
            port_of_loading: Some("INMAA".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&full_fields(), &reference);
        assert_eq!(
            field_result(&comparison, "port_of_loading").status,
            MatchStatus::Match
        );
    }

    #[test]
    fn test_company_names_ignore_legal_suffixes() {
        let reference = StructuredFields {
            exporter_name: Some("abc exports".to_string()),
            consignee_name: Some("XYZ IMPORTS".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&full_fields(), &reference);
        assert_eq!(
            field_result(&comparison, "exporter_name").status,
            MatchStatus::Match
        );
        assert_eq!(
            field_result(&comparison, "consignee_name").status,
            MatchStatus::Match
        );
    }

    #[test]
    fn test_invalid_hs_code_names_the_correct_side() {
        let reference = StructuredFields {
            hs_code: Some("84713010".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&full_fields(), &reference);

        let hs = field_result(&comparison, "hs_code");
        assert_eq!(hs.status, MatchStatus::Mismatch);
        assert!(hs.suggestion.as_deref().unwrap().contains("invoice HS code"));
    }

    #[test]
    fn test_currency_disagreement_is_flagged() {
        let reference = StructuredFields {
            total_value: Some("INR 25,487.50".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&full_fields(), &reference);

        let total = field_result(&comparison, "total_value");
        assert_eq!(total.status, MatchStatus::Mismatch);
        assert!(total.suggestion.as_deref().unwrap().contains("Currencies differ"));
    }

    #[test]
    fn test_report_carries_both_document_numbers() {
        let reference = StructuredFields {
            invoice_number: Some("BOE-7741".to_string()),
            ..full_fields()
        };
        let comparison = reconcile(&full_fields(), &reference);
        assert_eq!(comparison.invoice_number, "INV-001");
        assert_eq!(comparison.reference_number, "BOE-7741");
    }
}
