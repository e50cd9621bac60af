//! Value normalization for cross-document comparison

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Legal suffixes ignored when comparing company names
const LEGAL_SUFFIXES: &[&str] = &[
    "private",
    "limited",
    "pvt",
    "ltd",
    "llp",
    "llc",
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
];

/// Port code/name equivalences carried over from the upstream reference
/// data ("Mumbai" and "INMAA" name the same port there)
const PORT_ALIASES: &[(&str, &str)] = &[
    ("inmaa", "mumbai"),
    ("innsa", "nhava sheva"),
    ("indel", "delhi"),
    ("inblr", "bangalore"),
    ("usnyc", "new york"),
    ("uslax", "los angeles"),
    ("sgsin", "singapore"),
    ("aejea", "jebel ali"),
];

lazy_static! {
    static ref PORT_ALIAS_MAP: HashMap<&'static str, &'static str> =
        PORT_ALIASES.iter().copied().collect();
}

/// Lowercase, trim and collapse internal whitespace
pub fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Company comparison ignores case, punctuation and legal suffixes:
/// "ABC Exports Pvt. Ltd." and "abc exports" compare equal
pub fn normalize_company(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty() && !LEGAL_SUFFIXES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Port comparison folds known codes onto their port names
pub fn normalize_port(value: &str) -> String {
    let normalized = normalize_text(value);
    match PORT_ALIAS_MAP.get(normalized.as_str()) {
        Some(name) => (*name).to_string(),
        None => normalized,
    }
}

/// Date comparison is separator-insensitive: 15/01/2024 == 15-01-2024
pub fn normalize_date(value: &str) -> String {
    normalize_text(value)
        .chars()
        .map(|c| if c == '-' || c == '.' { '/' } else { c })
        .collect()
}
