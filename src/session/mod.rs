//! Edit session state
//!
//! Explicit context object for the host's browse-and-edit flow: a shared row
//! cache, the active search filter, and the selected row. The cache mutex is
//! the only shared state in the crate, so a best-effort background refresh
//! needs no further coordination.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::info;

use crate::mapping::SheetMapping;
use crate::models::RowSummary;
use crate::storage::{RowStore, StorageError};

/// Error type for session operations
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("No rows loaded; refresh the session first")]
    NothingLoaded,
    #[error("No row selected")]
    NoSelection,
    #[error("Row index out of range: {0}")]
    RowOutOfRange(usize),
    #[error("Row {0} is a header row")]
    HeaderRow(usize),
}

#[derive(Debug, Default)]
struct CacheState {
    rows: Vec<Vec<String>>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Shared snapshot of the row store contents
#[derive(Debug, Default)]
pub struct RowCache {
    state: Mutex<CacheState>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached rows from the store and stamp the refresh time.
    pub async fn refresh<S: RowStore>(&self, store: &S) -> Result<usize, StorageError> {
        let rows = store.read_all_rows().await?;
        let count = rows.len();
        let mut state = self.lock()?;
        state.rows = rows;
        state.refreshed_at = Some(Utc::now());
        info!("Row cache refreshed: {} row(s)", count);
        Ok(count)
    }

    /// Copy of the cached rows
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.state
            .lock()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }

    /// When the cache last refreshed, if ever
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .map(|state| state.refreshed_at)
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>, StorageError> {
        self.state
            .lock()
            .map_err(|_| StorageError::BackendError("row cache mutex poisoned".to_string()))
    }
}

/// Browse-and-edit session context
pub struct EditSession {
    mapping: SheetMapping,
    cache: Arc<RowCache>,
    filter: Option<String>,
    selected: Option<usize>,
}

impl EditSession {
    /// Create a session with its own cache
    pub fn new(mapping: SheetMapping) -> Self {
        Self::with_cache(mapping, Arc::new(RowCache::new()))
    }

    /// Create a session over a shared cache (e.g. one a background poller
    /// refreshes)
    pub fn with_cache(mapping: SheetMapping, cache: Arc<RowCache>) -> Self {
        Self {
            mapping,
            cache,
            filter: None,
            selected: None,
        }
    }

    pub fn mapping(&self) -> &SheetMapping {
        &self.mapping
    }

    pub fn cache(&self) -> &Arc<RowCache> {
        &self.cache
    }

    /// Refresh the shared cache from the store
    pub async fn refresh<S: RowStore>(&self, store: &S) -> Result<usize, StorageError> {
        self.cache.refresh(store).await
    }

    /// Set the search term applied by `summaries`. Blank terms clear the
    /// filter.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.filter = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Browse-list entries for data rows, filtered case-insensitively when a
    /// search term is set. The term matches anywhere in the rendered label.
    pub fn summaries(&self) -> Vec<RowSummary> {
        let rows = self.cache.rows();
        let needle = self.filter.as_deref().map(str::to_lowercase);
        rows.iter()
            .enumerate()
            .skip(self.mapping.header_rows)
            .map(|(index, values)| RowSummary::from_row(&self.mapping, index, values))
            .filter(|summary| match &needle {
                Some(needle) => summary.to_string().to_lowercase().contains(needle),
                None => true,
            })
            .collect()
    }

    /// Select a data row by absolute index
    pub fn select(&mut self, row_index: usize) -> Result<(), SessionError> {
        let rows = self.cache.rows();
        if rows.is_empty() {
            return Err(SessionError::NothingLoaded);
        }
        if row_index >= rows.len() {
            return Err(SessionError::RowOutOfRange(row_index));
        }
        if row_index < self.mapping.header_rows {
            return Err(SessionError::HeaderRow(row_index));
        }
        self.selected = Some(row_index);
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Move the selection to the next data row
    pub fn select_next(&mut self) -> Result<usize, SessionError> {
        let current = self.selected.ok_or(SessionError::NoSelection)?;
        self.select(current + 1)?;
        Ok(current + 1)
    }

    /// Move the selection to the previous data row
    pub fn select_previous(&mut self) -> Result<usize, SessionError> {
        let current = self.selected.ok_or(SessionError::NoSelection)?;
        let previous = current
            .checked_sub(1)
            .ok_or(SessionError::RowOutOfRange(current))?;
        self.select(previous)?;
        Ok(previous)
    }
}
