//! Currency-amount parsing and variance formatting

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "USD 25,487.50", "$5,000.00", "25,487.50 USD"
    static ref AMOUNT_RE: Regex = Regex::new(
        r"(?ix)
        ^\s*
        (?:(?P<pre>USD|INR|EUR|GBP|AUD|SGD|AED|JPY|[$₹€£])\s*)?
        (?P<value>\d[\d,]*(?:\.\d+)?)
        (?:\s*(?P<post>USD|INR|EUR|GBP|AUD|SGD|AED|JPY))?
        \s*$"
    )
    .unwrap();
}

/// A currency-tagged amount lifted out of an extraction field
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAmount {
    /// ISO currency code, where one was stated
    pub currency: Option<String>,
    pub value: f64,
}

/// Parse a monetary field value; None if the value is not amount-shaped
pub fn parse_amount(raw: &str) -> Option<ParsedAmount> {
    let caps = AMOUNT_RE.captures(raw)?;
    let digits: String = caps["value"].chars().filter(|c| *c != ',').collect();
    let value: f64 = digits.parse().ok()?;

    let currency = caps
        .name("pre")
        .or_else(|| caps.name("post"))
        .map(|m| canonical_currency(m.as_str()));

    Some(ParsedAmount { currency, value })
}

fn canonical_currency(token: &str) -> String {
    match token {
        "$" => "USD".to_string(),
        "₹" => "INR".to_string(),
        "€" => "EUR".to_string(),
        "£" => "GBP".to_string(),
        code => code.to_uppercase(),
    }
}

/// Display symbol for a currency code; empty for currencies without a
/// conventional symbol in the reports
pub fn currency_symbol(code: &str) -> &'static str {
    match code {
        "USD" | "AUD" | "SGD" => "$",
        "INR" => "₹",
        "EUR" => "€",
        "GBP" => "£",
        _ => "",
    }
}

/// Signed difference formatted for the comparison report, e.g. "+$12.50"
pub fn format_variance(diff: f64, currency: Option<&str>) -> String {
    let sign = if diff >= 0.0 { "+" } else { "-" };
    let symbol = currency.map(currency_symbol).unwrap_or("");
    format!("{}{}{:.2}", sign, symbol, diff.abs())
}
