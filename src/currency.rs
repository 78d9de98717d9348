//! Currency normalization: locale-formatted price strings to plain numbers.

use serde_json::Value;

/// Normalizes a JSON value to a number: numbers pass through unchanged,
/// strings go through [`parse_currency`]. Anything else is a failure.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_currency(s),
        _ => None,
    }
}

/// Parses a free-form currency string like `"R$ 1.234,56"` or `"59,90"`.
///
/// Currency markers (`R$`, `$`) and whitespace are stripped. When a decimal
/// comma is present, dots are thousands separators and get removed; without
/// a comma the dot is kept as the decimal point, so `"59.9"` stays 59.9.
pub fn parse_currency(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, 'R' | 'r' | '$'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Normalizes a JSON value to an integer (plain number or numeric string).
/// Fractional numbers truncate toward zero.
pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
