//! Record saving
//!
//! Converts submitted field text into sparse cell updates and applies them to
//! the row store. Every field converts independently: a failed field becomes
//! a warning and is skipped, the rest are written.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::convert::density::{DensityError, density_per_hectare};
use crate::convert::dms::DmsParseError;
use crate::convert::locale::{
    COORDINATE_PRECISION, DecimalFormatError, QUANTITY_PRECISION, format_decimal, parse_decimal,
};
use crate::mapping::SheetMapping;
use crate::models::{AreaMeasurement, GeoCoordinate};
use crate::storage::{CellUpdates, RowStore, StorageError};
use crate::validation::{ValidationError, validate_count, validate_planting_year};

/// Joined between selected comment entries in the comment cell
const COMMENT_SEPARATOR: &str = ", ";

/// One failed conversion within a submission. Callers pattern-match on the
/// kind; nothing here is fatal.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum FieldError {
    /// DMS grammar mismatch
    #[error(transparent)]
    Parse(#[from] DmsParseError),

    /// Locale-decimal text that is not a number
    #[error(transparent)]
    Format(#[from] DecimalFormatError),

    /// Numeric precondition violated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Density undefined for the submitted area
    #[error(transparent)]
    Density(#[from] DensityError),

    /// Density was requested but this submission carries no usable area
    #[error("not computed: no valid positive area in this submission")]
    MissingArea,
}

/// Warning attached to a single skipped field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldWarning {
    /// Stable field name, matching the edit surface
    pub field: &'static str,
    pub error: FieldError,
}

/// Per-field text submitted from the edit surface. `None` means "not edited";
/// untouched fields produce no cell writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordEdits {
    /// DMS location pair; also derives the latitude/longitude cells
    pub location: Option<String>,
    pub crop: Option<String>,
    pub variety: Option<String>,
    pub planting_year: Option<String>,
    /// Area in hectares; also derives the m² cell
    pub area_hectares: Option<String>,
    /// Absolute plant count; derives plants/ha when the area is usable
    pub plant_count: Option<String>,
    /// Absolute emitter count; derives emitters/ha when the area is usable
    pub emitter_count: Option<String>,
    pub flow_rate_m3_per_hour: Option<String>,
    pub precipitation_mm_per_hour: Option<String>,
    /// Selected comment entries; `Some(vec![])` clears the comment cell
    pub comments: Option<Vec<String>>,
}

/// Result of converting one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub cells: CellUpdates,
    pub warnings: Vec<FieldWarning>,
}

impl BatchOutcome {
    fn warn(&mut self, field: &'static str, error: FieldError) {
        self.warnings.push(FieldWarning { field, error });
    }
}

/// Convert one submission into sparse cell updates.
///
/// Stateless and free of I/O. Fields convert in dependency order (area before
/// the densities that reuse it) but fail independently: the outcome carries
/// the cells of every field that converted plus one warning per field that
/// did not.
pub fn convert_edits(mapping: &SheetMapping, edits: &RecordEdits) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    if let Some(location) = &edits.location {
        outcome
            .cells
            .insert(mapping.location, location.trim().to_string());
        match GeoCoordinate::from_dms_pair(location) {
            Ok(coordinate) => {
                outcome.cells.insert(
                    mapping.latitude,
                    format_decimal(coordinate.latitude(), COORDINATE_PRECISION),
                );
                outcome.cells.insert(
                    mapping.longitude,
                    format_decimal(coordinate.longitude(), COORDINATE_PRECISION),
                );
            }
            // Malformed location leaves latitude/longitude unset, never a
            // formatted zero.
            Err(error) => outcome.warn("location", error.into()),
        }
    }

    if let Some(crop) = &edits.crop {
        outcome.cells.insert(mapping.crop, crop.trim().to_string());
    }
    if let Some(variety) = &edits.variety {
        outcome
            .cells
            .insert(mapping.variety, variety.trim().to_string());
    }

    if let Some(year) = &edits.planting_year {
        match validate_planting_year(year) {
            Ok(value) => {
                outcome
                    .cells
                    .insert(mapping.planting_year, value.to_string());
            }
            Err(error) => outcome.warn("planting_year", error.into()),
        }
    }

    // Area converts first so the density fields can reuse it within the same
    // submission.
    let mut area: Option<AreaMeasurement> = None;
    if let Some(text) = &edits.area_hectares {
        match parse_area(text) {
            Ok(measurement) => {
                outcome.cells.insert(
                    mapping.area_hectares,
                    format_decimal(measurement.hectares(), QUANTITY_PRECISION),
                );
                outcome.cells.insert(
                    mapping.area_square_meters,
                    format_decimal(measurement.square_meters(), QUANTITY_PRECISION),
                );
                area = Some(measurement);
            }
            Err(error) => outcome.warn("area_hectares", error),
        }
    }

    if let Some(text) = &edits.plant_count {
        match derive_density("plant_count", text, area.as_ref()) {
            Ok(density) => {
                outcome
                    .cells
                    .insert(mapping.plants_per_hectare, density.to_string());
            }
            Err(warning) => outcome.warnings.push(warning),
        }
    }
    if let Some(text) = &edits.emitter_count {
        match derive_density("emitter_count", text, area.as_ref()) {
            Ok(density) => {
                outcome
                    .cells
                    .insert(mapping.emitters_per_hectare, density.to_string());
            }
            Err(warning) => outcome.warnings.push(warning),
        }
    }

    if let Some(text) = &edits.flow_rate_m3_per_hour {
        match parse_decimal(text) {
            Ok(value) => {
                outcome.cells.insert(
                    mapping.flow_rate_m3_per_hour,
                    format_decimal(value, QUANTITY_PRECISION),
                );
            }
            Err(error) => outcome.warn("flow_rate_m3_per_hour", error.into()),
        }
    }
    if let Some(text) = &edits.precipitation_mm_per_hour {
        match parse_decimal(text) {
            Ok(value) => {
                outcome.cells.insert(
                    mapping.precipitation_mm_per_hour,
                    format_decimal(value, QUANTITY_PRECISION),
                );
            }
            Err(error) => outcome.warn("precipitation_mm_per_hour", error.into()),
        }
    }

    if let Some(selected) = &edits.comments {
        outcome
            .cells
            .insert(mapping.comments, selected.join(COMMENT_SEPARATOR));
    }

    outcome
}

fn parse_area(text: &str) -> Result<AreaMeasurement, FieldError> {
    let value = parse_decimal(text)?;
    Ok(AreaMeasurement::from_hectares(value)?)
}

fn derive_density(
    field: &'static str,
    count_text: &str,
    area: Option<&AreaMeasurement>,
) -> Result<u32, FieldWarning> {
    let count = validate_count(field, count_text).map_err(|error| FieldWarning {
        field,
        error: error.into(),
    })?;
    let Some(area) = area else {
        return Err(FieldWarning {
            field,
            error: FieldError::MissingArea,
        });
    };
    density_per_hectare(count, area.hectares()).map_err(|error| FieldWarning {
        field,
        error: error.into(),
    })
}

/// Report returned to the host after a write-back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveReport {
    /// Number of cells written
    pub cells_written: usize,
    /// Fields skipped, one warning each
    pub warnings: Vec<FieldWarning>,
}

/// Record saver over a row store backend
pub struct RecordSaver<S: RowStore> {
    store: S,
}

impl<S: RowStore> RecordSaver<S> {
    /// Create a new saver with the given backend
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convert a submission and write the successful fields back.
    ///
    /// Field failures are reported, not fatal; only a storage failure aborts.
    pub async fn save(
        &self,
        mapping: &SheetMapping,
        row_index: usize,
        edits: &RecordEdits,
    ) -> Result<SaveReport, StorageError> {
        let outcome = convert_edits(mapping, edits);
        for warning in &outcome.warnings {
            warn!(
                "Skipped field '{}' on row {}: {}",
                warning.field, row_index, warning.error
            );
        }

        if !outcome.cells.is_empty() {
            self.store.write_cells(row_index, &outcome.cells).await?;
        }
        info!("Wrote {} cell(s) to row {}", outcome.cells.len(), row_index);

        Ok(SaveReport {
            cells_written: outcome.cells.len(),
            warnings: outcome.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_derives_both_coordinate_cells() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            location: Some("33°10'16.8\"S 70°45'1.2\"W".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.cells[&mapping.latitude], "-33,17133333");
        assert_eq!(outcome.cells[&mapping.longitude], "-70,75033333");
    }

    #[test]
    fn malformed_location_leaves_coordinates_unset() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            location: Some("not a coordinate".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert!(!outcome.cells.contains_key(&mapping.latitude));
        assert!(!outcome.cells.contains_key(&mapping.longitude));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(outcome.warnings[0].error, FieldError::Parse(_)));
    }

    #[test]
    fn area_derives_square_meters() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            area_hectares: Some("2,5".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert_eq!(outcome.cells[&mapping.area_hectares], "2,50");
        assert_eq!(outcome.cells[&mapping.area_square_meters], "25000,00");
    }

    #[test]
    fn densities_derive_from_counts_and_area() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            area_hectares: Some("10".to_string()),
            plant_count: Some("101".to_string()),
            emitter_count: Some("2500".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.cells[&mapping.plants_per_hectare], "11");
        assert_eq!(outcome.cells[&mapping.emitters_per_hectare], "250");
    }

    #[test]
    fn density_is_not_computed_on_zero_area() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            area_hectares: Some("0".to_string()),
            plant_count: Some("100".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert!(!outcome.cells.contains_key(&mapping.plants_per_hectare));
        assert!(matches!(
            outcome.warnings[0].error,
            FieldError::Density(DensityError::NonPositiveArea(_))
        ));
    }

    #[test]
    fn density_is_not_computed_without_an_area() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            plant_count: Some("100".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert_eq!(outcome.warnings[0].error, FieldError::MissingArea);
    }

    #[test]
    fn a_failed_field_does_not_block_the_others() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            area_hectares: Some("not an area".to_string()),
            crop: Some("Vid".to_string()),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert_eq!(outcome.cells[&mapping.crop], "Vid");
        assert!(!outcome.cells.contains_key(&mapping.area_hectares));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].field, "area_hectares");
    }

    #[test]
    fn comments_join_into_one_cell() {
        let mapping = SheetMapping::default();
        let edits = RecordEdits {
            comments: Some(vec![
                "No crop data".to_string(),
                "Probe is not operating".to_string(),
            ]),
            ..RecordEdits::default()
        };
        let outcome = convert_edits(&mapping, &edits);
        assert_eq!(
            outcome.cells[&mapping.comments],
            "No crop data, Probe is not operating"
        );
    }

    #[test]
    fn an_empty_submission_touches_nothing() {
        let mapping = SheetMapping::default();
        let outcome = convert_edits(&mapping, &RecordEdits::default());
        assert!(outcome.cells.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
