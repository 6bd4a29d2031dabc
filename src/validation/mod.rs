//! Numeric field validation
//!
//! Precondition checks applied to user-entered field text before any
//! arithmetic. The conversion core never receives raw unparsed text; these
//! functions produce the validated numbers it consumes.

use serde::Serialize;
use thiserror::Error;

use crate::convert::locale::{DecimalFormatError, parse_decimal};

/// Earliest accepted planting year
pub const MIN_PLANTING_YEAR: i32 = 1900;

/// Latest accepted planting year
pub const MAX_PLANTING_YEAR: i32 = 2100;

/// Errors that can occur during numeric field validation.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input is not numeric
    #[error("{field} is not a number: {text}")]
    NotANumber { field: &'static str, text: String },

    /// Input has a fractional part where a whole number is required
    #[error("{field} must be a whole number: {text}")]
    NotAWholeNumber { field: &'static str, text: String },

    /// Input is negative where a non-negative value is required
    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: f64 },

    /// Input is outside the accepted range
    #[error("{field} out of range ({min}..={max}): {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an absolute item count (plants, emitters).
///
/// # Rules
///
/// - Must not be empty
/// - Accepts locale-decimal text, but the value must be a whole number
/// - Must not be negative
/// - Must fit in `u32`
pub fn validate_count(field: &'static str, text: &str) -> ValidationResult<u32> {
    let value = parse_numeric(field, text)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAWholeNumber {
            field,
            text: text.trim().to_string(),
        });
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max: f64::from(u32::MAX),
            value,
        });
    }
    Ok(value as u32)
}

/// Validate a planting year.
///
/// # Rules
///
/// - Must be a whole number
/// - Must fall within 1900..=2100
pub fn validate_planting_year(text: &str) -> ValidationResult<i32> {
    let field = "planting year";
    let value = parse_numeric(field, text)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAWholeNumber {
            field,
            text: text.trim().to_string(),
        });
    }
    if value < f64::from(MIN_PLANTING_YEAR) || value > f64::from(MAX_PLANTING_YEAR) {
        return Err(ValidationError::OutOfRange {
            field,
            min: f64::from(MIN_PLANTING_YEAR),
            max: f64::from(MAX_PLANTING_YEAR),
            value,
        });
    }
    Ok(value as i32)
}

fn parse_numeric(field: &'static str, text: &str) -> ValidationResult<f64> {
    match parse_decimal(text) {
        Ok(value) => Ok(value),
        Err(DecimalFormatError::Empty) => Err(ValidationError::Empty(field)),
        Err(DecimalFormatError::NotANumber(text)) => {
            Err(ValidationError::NotANumber { field, text })
        }
    }
}
