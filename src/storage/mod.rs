//! Row store abstraction
//!
//! Defines the RowStore trait over the external tabular store that holds one
//! record per physical site, and implementations:
//! - InMemoryRowStore: in-process grid (tests, native tooling)
//!
//! The remote spreadsheet client lives in the host application and implements
//! the same trait; this crate never addresses the remote API directly.

use async_trait::async_trait;
use std::collections::BTreeMap;

/// Sparse cell update for one row, keyed by column index
pub type CellUpdates = BTreeMap<usize, String>;

/// Error type for row store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Row not found: {0}")]
    RowNotFound(usize),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Trait for row stores
///
/// This trait abstracts by-index row reads and sparse cell writes across
/// storage systems (in-memory grid, remote spreadsheet API). Row indices are
/// zero-based and absolute; header rows are the mapping layer's concern.
#[async_trait(?Send)]
pub trait RowStore: Send + Sync {
    /// Total number of rows, headers included
    async fn row_count(&self) -> Result<usize, StorageError>;

    /// Read one row; backends may omit trailing blank cells
    async fn read_row(&self, index: usize) -> Result<Vec<String>, StorageError>;

    /// Read every row, headers included
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>, StorageError>;

    /// Apply a sparse set of cell updates to one row
    async fn write_cells(&self, index: usize, updates: &CellUpdates) -> Result<(), StorageError>;
}

// Row store implementations
pub mod memory;
