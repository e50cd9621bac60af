// Packing list rules
use super::Rule;
use crate::patterns;
use shared_types::Severity;

pub static RULES: &[Rule] = &[
    Rule {
        name: "item_description",
        severity: Severity::Warning,
        success_message: "Item descriptions are present",
        error_message: "No item, product or description entries found",
        predicate: has_item_descriptions,
    },
    Rule {
        name: "quantity",
        severity: Severity::Warning,
        success_message: "Quantities are present",
        error_message: "No quantity details found (qty, pieces, cartons, weight)",
        predicate: has_quantities,
    },
];

fn has_item_descriptions(text: &str) -> bool {
    patterns::contains_any(text, patterns::ITEM_KEYWORDS)
}

fn has_quantities(text: &str) -> bool {
    patterns::contains_any(text, patterns::QUANTITY_KEYWORDS)
}
