//! Keyword tables and compiled patterns shared by the rule sets

use lazy_static::lazy_static;
use regex::Regex;

/// Party keywords expected on a commercial invoice
pub const PARTY_KEYWORDS: &[&str] = &[
    "buyer",
    "seller",
    "consignee",
    "shipper",
    "exporter",
    "importer",
];

/// Customs-declaration keywords expected on a Bill of Entry
pub const CUSTOMS_KEYWORDS: &[&str] = &[
    "customs",
    "declaration",
    "duty",
    "bill of entry",
    "assessable value",
];

/// Line-item keywords expected on a packing list
pub const ITEM_KEYWORDS: &[&str] = &[
    "item",
    "product",
    "description",
    "goods",
    "commodity",
];

/// Quantity keywords expected on a packing list
pub const QUANTITY_KEYWORDS: &[&str] = &[
    "quantity",
    "qty",
    "pcs",
    "pieces",
    "cartons",
    "packages",
    "net weight",
    "gross weight",
];

/// GST registration markers expected on Indian export invoices
pub const GST_KEYWORDS: &[&str] = &["gstin", "gst no", "gst number", "igst", "cgst", "sgst"];

lazy_static! {
    /// Numeric dates (15/01/2024, 2024-01-15) and written dates (15 Jan 2024)
    pub static ref DATE_RE: Regex = Regex::new(
        r"(?i)\b\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+\d{4}\b"
    )
    .unwrap();

    /// Invoice-number-like tokens: a labelled reference containing a digit,
    /// or a bare INV- reference
    pub static ref INVOICE_NUMBER_RE: Regex = Regex::new(
        r"(?i)invoice\s*(?:no\.?|number|#)?\s*[:#]?\s*[A-Za-z0-9/\-]*\d[A-Za-z0-9/\-]*|\bINV[/\-]?\d+\b"
    )
    .unwrap();

    /// Currency-tagged amounts: USD 25,487.50 / $5,000.00 / ₹1,20,000
    pub static ref CURRENCY_AMOUNT_RE: Regex = Regex::new(
        r"(?i)(?:USD|INR|EUR|GBP|AUD|SGD|AED|JPY|\$|₹|€|£)\s*\d[\d,]*(?:\.\d{1,2})?"
    )
    .unwrap();

    /// Harmonized System codes in the NNNN.NN.NN shape
    pub static ref HS_CODE_RE: Regex = Regex::new(r"\b\d{4}\.\d{2}\.\d{2}\b").unwrap();
}

/// Case-insensitive keyword containment over any of a group
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text_lower = text.to_lowercase();
    keywords.iter().any(|kw| text_lower.contains(kw))
}
