//! Cell text normalization
//!
//! The pages pad cells with regular and non-breaking spaces and print numbers
//! with thousands separators and percent signs. Text fields are trimmed only;
//! numeric fields are stripped then coerced, and a coercion failure fails the
//! whole request rather than producing a partial record.

use crate::error::{AppError, Result};

/// Trim surrounding whitespace, including `&nbsp;` (U+00A0).
pub fn clean(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}')
        .to_string()
}

fn strip_numeric(text: &str) -> String {
    clean(text).replace([',', '%'], "")
}

/// Coerce a cell to a float, stripping separators and percent signs first.
pub fn parse_f64(text: &str) -> Result<f64> {
    let stripped = strip_numeric(text);
    stripped
        .parse::<f64>()
        .map_err(|_| AppError::Parse(format!("expected a number, got {:?}", clean(text))))
}

/// Coerce a cell to a signed integer (volumes, share counts).
pub fn parse_i64(text: &str) -> Result<i64> {
    let stripped = strip_numeric(text);
    stripped
        .parse::<i64>()
        .map_err(|_| AppError::Parse(format!("expected an integer, got {:?}", clean(text))))
}
