// Commercial invoice rules
use super::Rule;
use crate::patterns;
use shared_types::Severity;

pub static RULES: &[Rule] = &[
    Rule {
        name: "invoice_number",
        severity: Severity::Error,
        success_message: "Invoice number is present",
        error_message: "No invoice number found; every commercial invoice must carry one",
        predicate: has_invoice_number,
    },
    Rule {
        name: "currency_amount",
        severity: Severity::Error,
        success_message: "Currency-tagged amount is present",
        error_message: "No currency-tagged amount found (e.g. USD 1,250.00)",
        predicate: has_currency_amount,
    },
    Rule {
        name: "party_identification",
        severity: Severity::Warning,
        success_message: "Buyer/seller parties are identified",
        error_message: "No buyer, seller, consignee or shipper identification found",
        predicate: has_party_identification,
    },
];

fn has_invoice_number(text: &str) -> bool {
    patterns::INVOICE_NUMBER_RE.is_match(text)
}

fn has_currency_amount(text: &str) -> bool {
    patterns::CURRENCY_AMOUNT_RE.is_match(text)
}

fn has_party_identification(text: &str) -> bool {
    patterns::contains_any(text, patterns::PARTY_KEYWORDS) || {
        let text_lower = text.to_lowercase();
        text_lower.contains("buyer:") || text_lower.contains("sold to")
    }
}
