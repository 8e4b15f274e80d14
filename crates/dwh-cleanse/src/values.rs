//! Value interpretation shared by the entity rules.
//!
//! Raw staging values are text. These helpers turn them into typed values,
//! returning `None` for anything blank or unparseable.

use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Returns the trimmed value, or `None` when blank.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Trimmed owned text, or `None` when blank.
pub fn clean_text(value: &str) -> Option<String> {
    non_blank(value).map(str::to_string)
}

/// Parse a decimal value.
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
///
/// Non-finite values are treated as unparseable.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = non_blank(value)?;
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', "");
    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Parse an integer, accepting integral decimals such as `"3.0"`.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = non_blank(value)?;
    if let Ok(number) = trimmed.parse::<i64>() {
        return Some(number);
    }
    let number = parse_decimal(trimmed)?;
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and
/// compact `YYYYMMDD`. The value `0` and any other form yield `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = non_blank(value)?;
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if trimmed.len() != 8 {
            return None;
        }
        return NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|datetime| datetime.date())
}

/// Total order over optional decimals: `None` first, then by value.
pub fn cmp_decimal(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}
