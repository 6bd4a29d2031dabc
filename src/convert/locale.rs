//! Locale-decimal text
//!
//! The external row store renders decimal numbers with a comma as the
//! fractional separator. These helpers bridge between machine `f64` values
//! and that convention.

use serde::Serialize;
use thiserror::Error;

/// Fractional digits used when storing coordinate values
pub const COORDINATE_PRECISION: usize = 8;

/// Fractional digits used when storing area, flow, and precipitation values
pub const QUANTITY_PRECISION: usize = 2;

/// Errors that can occur while reading locale-decimal text
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum DecimalFormatError {
    /// Empty text means "value absent"; callers must not coerce it to zero
    #[error("empty text where a number was expected")]
    Empty,

    /// Text is not numeric even after separator normalization
    #[error("not a number after separator normalization: {0}")]
    NotANumber(String),
}

/// Render `value` with `precision` fractional digits and a comma separator.
pub fn format_decimal(value: f64, precision: usize) -> String {
    format!("{value:.precision$}").replace('.', ",")
}

/// Parse locale-decimal text, accepting either ',' or '.' as the separator.
///
/// Round-trip law: for any value with at most `precision` fractional digits,
/// `parse_decimal(&format_decimal(value, precision))` returns `value`.
pub fn parse_decimal(text: &str) -> Result<f64, DecimalFormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecimalFormatError::Empty);
    }

    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| DecimalFormatError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(DecimalFormatError::NotANumber(text.to_string()));
    }
    Ok(value)
}
