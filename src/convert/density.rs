//! Area and density derivation

use serde::Serialize;
use thiserror::Error;

/// Square meters per hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Errors that can occur while deriving densities
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum DensityError {
    /// Density is an explicit undefined outcome, never zero, without a
    /// positive area
    #[error("density is undefined for a non-positive area: {0} ha")]
    NonPositiveArea(f64),
}

/// Derive square meters from hectares. Exact: 1 ha = 10 000 m².
pub fn to_square_meters(area_ha: f64) -> f64 {
    area_ha * SQUARE_METERS_PER_HECTARE
}

/// Items per hectare, rounded up. Never round-to-nearest or truncation.
pub fn density_per_hectare(count: u32, area_ha: f64) -> Result<u32, DensityError> {
    // NaN fails the comparison and is rejected with the same error.
    if !(area_ha > 0.0) {
        return Err(DensityError::NonPositiveArea(area_ha));
    }
    Ok((f64::from(count) / area_ha).ceil() as u32)
}
