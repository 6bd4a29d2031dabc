//! Coordinate and area value types

use serde::Serialize;

use crate::convert::density::to_square_meters;
use crate::convert::dms::{self, DmsParseError};
use crate::validation::{ValidationError, ValidationResult};

/// Degree bound for latitudes
pub const MAX_LATITUDE: f64 = 90.0;

/// Degree bound for longitudes
pub const MAX_LONGITUDE: f64 = 180.0;

/// A resolved coordinate pair in signed decimal degrees.
///
/// Both components resolve or construction fails; there is no partial or NaN
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Build a coordinate from signed decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        if !latitude.is_finite() || latitude.abs() > MAX_LATITUDE {
            return Err(ValidationError::OutOfRange {
                field: "latitude",
                min: -MAX_LATITUDE,
                max: MAX_LATITUDE,
                value: latitude,
            });
        }
        if !longitude.is_finite() || longitude.abs() > MAX_LONGITUDE {
            return Err(ValidationError::OutOfRange {
                field: "longitude",
                min: -MAX_LONGITUDE,
                max: MAX_LONGITUDE,
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Convert a DMS latitude/longitude pair. Fails as a whole on any
    /// malformed component.
    pub fn from_dms_pair(text: &str) -> Result<Self, DmsParseError> {
        let (latitude, longitude) = dms::parse_pair(text)?;
        Ok(Self {
            latitude: latitude.to_decimal_degrees(),
            longitude: longitude.to_decimal_degrees(),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A field area in hectares with its derived square-meter equivalent.
///
/// The m² value is always `hectares * 10_000`, computed on demand; it is
/// never stored or edited independently, so it cannot go stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaMeasurement {
    hectares: f64,
}

impl AreaMeasurement {
    /// Non-negative hectares. Zero is representable; density stays undefined
    /// for it.
    pub fn from_hectares(hectares: f64) -> ValidationResult<Self> {
        if !hectares.is_finite() || hectares < 0.0 {
            return Err(ValidationError::Negative {
                field: "area",
                value: hectares,
            });
        }
        Ok(Self { hectares })
    }

    pub fn hectares(&self) -> f64 {
        self.hectares
    }

    pub fn square_meters(&self) -> f64 {
        to_square_meters(self.hectares)
    }
}
