//! Record loading
//!
//! Loads one row into the editable form model, and the whole sheet into
//! browse-list summaries.

use tracing::warn;

use crate::mapping::SheetMapping;
use crate::models::{ProbeRecord, RowSummary};
use crate::storage::{RowStore, StorageError};

/// Record loader over a row store backend
pub struct RecordLoader<S: RowStore> {
    store: S,
}

impl<S: RowStore> RecordLoader<S> {
    /// Create a new loader with the given backend
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load one row as an editable record.
    ///
    /// Rows shorter than the highest mapped column load with blank fields;
    /// a short row is logged, not rejected.
    pub async fn load_record(
        &self,
        mapping: &SheetMapping,
        row_index: usize,
    ) -> Result<ProbeRecord, StorageError> {
        let values = self.store.read_row(row_index).await?;
        if values.len() <= mapping.max_column() {
            warn!(
                "Row {} has {} cell(s), below the mapped maximum {}; missing cells read as blank",
                row_index,
                values.len(),
                mapping.max_column()
            );
        }
        Ok(ProbeRecord::from_row(mapping, row_index, &values))
    }

    /// Load browse-list summaries for every data row (header rows skipped)
    pub async fn load_summaries(
        &self,
        mapping: &SheetMapping,
    ) -> Result<Vec<RowSummary>, StorageError> {
        let rows = self.store.read_all_rows().await?;
        Ok(rows
            .iter()
            .enumerate()
            .skip(mapping.header_rows)
            .map(|(index, values)| RowSummary::from_row(mapping, index, values))
            .collect())
    }
}
