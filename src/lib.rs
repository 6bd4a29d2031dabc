//! Probe Record SDK - shared library for spreadsheet-backed record editing
//!
//! Provides unified interfaces for:
//! - Row store access (via storage backends)
//! - Record loading/saving with per-field conversion and partial-success write-back
//! - DMS coordinate parsing and decimal-degree conversion
//! - Locale-decimal formatting and area/density derivation
//! - Numeric field validation
//! - Edit session state (row cache, search filter, row selection)

pub mod convert;
pub mod mapping;
pub mod models;
pub mod record;
pub mod session;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use storage::memory::InMemoryRowStore;
pub use storage::{CellUpdates, RowStore, StorageError};

pub use convert::{
    DecimalFormatError, DensityError, DmsAngle, DmsParseError, Hemisphere, density_per_hectare,
    format_decimal, parse_decimal, to_square_meters,
};

pub use mapping::SheetMapping;
pub use models::{
    AreaMeasurement, GeoCoordinate, ProbeRecord, RecordFields, RecordHeader, RowSummary,
};
pub use record::{
    BatchOutcome, FieldError, FieldWarning, RecordEdits, RecordLoader, RecordSaver, SaveReport,
    convert_edits,
};
pub use session::{EditSession, RowCache, SessionError};
pub use validation::{ValidationError, ValidationResult};
