//! Probe record models
//!
//! The one-row form model the host application edits, plus the browse-list
//! summary used for row selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mapping::SheetMapping;

/// Comment catalog offered by the edit surface. Selected entries are joined
/// into the single comment cell.
pub const STANDARD_COMMENTS: &[&str] = &[
    "Account does not exist",
    "Probe does not exist or is not linked",
    "Probe cannot be georeferenced",
    "Probe has no enabled sensors",
    "Probe is not operating",
    "No crop data",
    "Incomplete crop data",
    "Crop data not plausible",
    "Ask about missing data",
];

/// Identity block of a record (read-only in the edit surface)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub account_id: String,
    pub account_name: String,
    pub field_id: String,
    pub field_name: String,
    pub probe_id: String,
    pub probe_name: String,
    pub comment: String,
}

impl RecordHeader {
    /// Deep link to the field dashboard on the hosting platform
    pub fn field_dashboard_url(&self, base_url: &str) -> String {
        format!(
            "{}/site/dashboard/campo.do?cuentaId={}&campoId={}",
            base_url.trim_end_matches('/'),
            self.account_id,
            self.field_id
        )
    }

    /// Deep link to the probe's soil view on the hosting platform
    pub fn probe_dashboard_url(&self, base_url: &str) -> String {
        format!(
            "{}/site/ha/suelo.do?cuentaId={}&campoId={}&sectorId={}",
            base_url.trim_end_matches('/'),
            self.account_id,
            self.field_id,
            self.probe_id
        )
    }
}

/// Editable field cells of a record, as stored (raw cell text)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub location: String,
    pub latitude: String,
    pub longitude: String,
    pub crop: String,
    pub variety: String,
    pub planting_year: String,
    pub plants_per_hectare: String,
    pub emitters_per_hectare: String,
    pub area_hectares: String,
    pub area_square_meters: String,
    pub flow_rate_m3_per_hour: String,
    pub precipitation_mm_per_hour: String,
}

/// One row of the external store as an editable record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub row_index: usize,
    pub header: RecordHeader,
    pub fields: RecordFields,
}

impl ProbeRecord {
    /// Build a record from a raw row. Missing trailing cells read as blank.
    pub fn from_row(mapping: &SheetMapping, row_index: usize, values: &[String]) -> Self {
        let cell = |index: usize| values.get(index).cloned().unwrap_or_default();
        Self {
            row_index,
            header: RecordHeader {
                account_id: cell(mapping.account_id),
                account_name: cell(mapping.account_name),
                field_id: cell(mapping.field_id),
                field_name: cell(mapping.field_name),
                probe_id: cell(mapping.probe_id),
                probe_name: cell(mapping.probe_name),
                comment: cell(mapping.comments),
            },
            fields: RecordFields {
                location: cell(mapping.location),
                latitude: cell(mapping.latitude),
                longitude: cell(mapping.longitude),
                crop: cell(mapping.crop),
                variety: cell(mapping.variety),
                planting_year: cell(mapping.planting_year),
                plants_per_hectare: cell(mapping.plants_per_hectare),
                emitters_per_hectare: cell(mapping.emitters_per_hectare),
                area_hectares: cell(mapping.area_hectares),
                area_square_meters: cell(mapping.area_square_meters),
                flow_rate_m3_per_hour: cell(mapping.flow_rate_m3_per_hour),
                precipitation_mm_per_hour: cell(mapping.precipitation_mm_per_hour),
            },
        }
    }
}

/// Browse-list entry for one data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSummary {
    pub row_index: usize,
    pub account_id: String,
    pub account_name: String,
    pub field_id: String,
    pub field_name: String,
    pub probe_id: String,
    pub probe_name: String,
}

impl RowSummary {
    /// Build a summary from a raw row. Missing trailing cells read as blank.
    pub fn from_row(mapping: &SheetMapping, row_index: usize, values: &[String]) -> Self {
        let cell = |index: usize| values.get(index).cloned().unwrap_or_default();
        Self {
            row_index,
            account_id: cell(mapping.account_id),
            account_name: cell(mapping.account_name),
            field_id: cell(mapping.field_id),
            field_name: cell(mapping.field_name),
            probe_id: cell(mapping.probe_id),
            probe_name: cell(mapping.probe_name),
        }
    }
}

impl fmt::Display for RowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {} - Account: {} (ID: {}) - Field: {} (ID: {}) - Probe: {} (ID: {})",
            self.row_index,
            self.account_name,
            self.account_id,
            self.field_name,
            self.field_id,
            self.probe_name,
            self.probe_id
        )
    }
}
