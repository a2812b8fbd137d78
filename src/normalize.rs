use chrono::NaiveDate;

use crate::models::{RawRow, Transaction};

/// Date formats accepted from export files, tried in order. The two-digit
/// year form sits before the four-digit one: chrono's `%Y` happily eats a
/// bare "24" as year 24, while `%y` rejects four-digit input outright.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parse a currency-formatted amount cell.
///
/// Strips `$`, commas, quotes, and whitespace; accounting-style parentheses
/// denote a negative. Unparseable cells become `None`, never zero.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"') && !c.is_whitespace())
        .collect();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

/// Parse a free-text date cell against the known formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Map yes/no-style flag cells to bool. Anything unrecognized is false;
/// flags default closed rather than carrying a missing state.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true"
    )
}

/// Coerce one raw CSV row into a typed transaction. Per-cell failures land
/// as missing values; this never rejects a row.
pub fn normalize(raw: &RawRow) -> Transaction {
    Transaction {
        row_id: String::new(),
        provenance_fingerprint: String::new(),
        content_fingerprint: String::new(),
        date: parse_date(&raw.date),
        description: raw.description.trim().to_string(),
        amount: parse_amount(&raw.amount),
        account: raw.account.trim().to_string(),
        institution: raw.institution.trim().to_string(),
        source_category: raw.category.trim().to_string(),
        is_hidden: raw.is_hidden.as_deref().map(parse_flag).unwrap_or(false),
        is_pending: raw.is_pending.as_deref().map(parse_flag).unwrap_or(false),
        extra: raw.extra.clone(),
        source_file: raw.source_file.clone(),
        assigned_category: None,
    }
}
