//! Data models for the SDK
//!
//! Defines the coordinate/area value types and the one-row record model the
//! host application edits. All instances are built from row text at conversion
//! time; the external row store owns the persisted state.

pub mod coordinate;
pub mod record;

pub use coordinate::{AreaMeasurement, GeoCoordinate, MAX_LATITUDE, MAX_LONGITUDE};
pub use record::{ProbeRecord, RecordFields, RecordHeader, RowSummary, STANDARD_COMMENTS};
