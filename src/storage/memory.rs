//! In-memory row store
//!
//! Implements RowStore over a mutex-guarded grid. Used by tests and native
//! tooling; behaves like a spreadsheet in that writes beyond a row's current
//! width grow the row with blank cells.

use super::{CellUpdates, RowStore, StorageError};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// In-memory row store backend
pub struct InMemoryRowStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl InMemoryRowStore {
    /// Create a store seeded with the given rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Copy of the current grid contents
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Vec<String>>>, StorageError> {
        self.rows
            .lock()
            .map_err(|_| StorageError::BackendError("row grid mutex poisoned".to_string()))
    }
}

#[async_trait(?Send)]
impl RowStore for InMemoryRowStore {
    async fn row_count(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    async fn read_row(&self, index: usize) -> Result<Vec<String>, StorageError> {
        self.lock()?
            .get(index)
            .cloned()
            .ok_or(StorageError::RowNotFound(index))
    }

    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>, StorageError> {
        Ok(self.lock()?.clone())
    }

    async fn write_cells(&self, index: usize, updates: &CellUpdates) -> Result<(), StorageError> {
        let mut rows = self.lock()?;
        let row = rows
            .get_mut(index)
            .ok_or(StorageError::RowNotFound(index))?;
        for (&column, value) in updates {
            if column >= row.len() {
                row.resize(column + 1, String::new());
            }
            row[column] = value.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryRowStore {
        InMemoryRowStore::new(vec![
            vec!["header".to_string()],
            vec!["a".to_string(), "b".to_string()],
        ])
    }

    #[tokio::test]
    async fn reads_rows_by_index() {
        let store = store();
        assert_eq!(store.row_count().await.unwrap(), 2);
        assert_eq!(store.read_row(1).await.unwrap()[0], "a");
        assert!(matches!(
            store.read_row(5).await,
            Err(StorageError::RowNotFound(5))
        ));
    }

    #[tokio::test]
    async fn writes_grow_short_rows() {
        let store = store();
        let mut updates = CellUpdates::new();
        updates.insert(4, "x".to_string());
        store.write_cells(1, &updates).await.unwrap();

        let rows = store.snapshot();
        assert_eq!(rows[1].len(), 5);
        assert_eq!(rows[1][4], "x");
        assert_eq!(rows[1][2], "");
    }
}
