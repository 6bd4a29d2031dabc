//! Conversion core
//!
//! Pure, stateless converters between the row store's textual conventions and
//! machine values:
//! - DMS coordinate text to decimal degrees
//! - Locale-decimal text (comma separator) to and from `f64`
//! - Hectares to square meters, absolute counts to per-hectare densities
//!
//! Nothing here performs I/O or touches shared state; every function is safe
//! to call concurrently.

pub mod density;
pub mod dms;
pub mod locale;

pub use density::{DensityError, SQUARE_METERS_PER_HECTARE, density_per_hectare, to_square_meters};
pub use dms::{DmsAngle, DmsParseError, Hemisphere, parse_angle, parse_pair};
pub use locale::{
    COORDINATE_PRECISION, DecimalFormatError, QUANTITY_PRECISION, format_decimal, parse_decimal,
};
