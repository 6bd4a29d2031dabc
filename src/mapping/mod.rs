//! Sheet column mapping
//!
//! Field-to-column assignments for the external row store, carried as one
//! immutable structure instead of scattered index literals. Only the
//! mapping-aware layers (loader, saver, session) consume it; the conversion
//! core stays column-agnostic.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Zero-based column index for each mapped field, plus the number of leading
/// header rows to skip when listing data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMapping {
    pub account_id: usize,
    pub account_name: usize,
    pub field_id: usize,
    pub field_name: usize,
    pub probe_name: usize,
    pub probe_id: usize,
    pub location: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub crop: usize,
    pub variety: usize,
    pub planting_year: usize,
    pub plants_per_hectare: usize,
    pub emitters_per_hectare: usize,
    pub area_hectares: usize,
    pub area_square_meters: usize,
    pub flow_rate_m3_per_hour: usize,
    pub precipitation_mm_per_hour: usize,
    pub comments: usize,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

fn default_header_rows() -> usize {
    1
}

impl Default for SheetMapping {
    /// The production sheet layout
    fn default() -> Self {
        Self {
            account_id: 0,
            account_name: 1,
            field_id: 2,
            field_name: 3,
            probe_name: 10,
            probe_id: 11,
            location: 12,
            latitude: 13,
            longitude: 14,
            crop: 17,
            variety: 18,
            planting_year: 20,
            plants_per_hectare: 21,
            emitters_per_hectare: 22,
            area_hectares: 29,
            area_square_meters: 30,
            flow_rate_m3_per_hour: 31,
            precipitation_mm_per_hour: 32,
            comments: 39,
            header_rows: 1,
        }
    }
}

impl SheetMapping {
    /// Create a mapping with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mapping from a YAML or JSON file, dispatched on extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let mapping = match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML mapping: {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON mapping: {}", path.display()))?,
            other => bail!("Unsupported mapping file extension: {:?}", other),
        };
        Ok(mapping)
    }

    /// Highest column index any field maps to
    pub fn max_column(&self) -> usize {
        [
            self.account_id,
            self.account_name,
            self.field_id,
            self.field_name,
            self.probe_name,
            self.probe_id,
            self.location,
            self.latitude,
            self.longitude,
            self.crop,
            self.variety,
            self.planting_year,
            self.plants_per_hectare,
            self.emitters_per_hectare,
            self.area_hectares,
            self.area_square_meters,
            self.flow_rate_m3_per_hour,
            self.precipitation_mm_per_hour,
            self.comments,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
