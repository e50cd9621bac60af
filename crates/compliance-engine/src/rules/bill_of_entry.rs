// Bill of Entry (customs declaration) rules
use super::Rule;
use crate::patterns;
use shared_types::Severity;

pub static RULES: &[Rule] = &[
    Rule {
        name: "customs_declaration",
        severity: Severity::Error,
        success_message: "Customs declaration details are present",
        error_message: "No customs, declaration or duty details found",
        predicate: has_customs_details,
    },
    Rule {
        name: "hs_code",
        severity: Severity::Error,
        success_message: "Harmonized System code is present",
        error_message: "No HS code in the NNNN.NN.NN format found",
        predicate: has_hs_code,
    },
];

fn has_customs_details(text: &str) -> bool {
    patterns::contains_any(text, patterns::CUSTOMS_KEYWORDS)
}

fn has_hs_code(text: &str) -> bool {
    patterns::HS_CODE_RE.is_match(text)
}
