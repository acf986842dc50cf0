//! Record Store Port - Durable storage for analysis records.
//!
//! The store accepts single-record inserts and exposes a paginated full scan.
//! Callers that need every record use [`scan_all`], which hides the cursor.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::feedback::{AnalysisRecord, StoredItem};

/// Port for persisting and scanning analysis records.
///
/// # Contract
///
/// - `put` inserts one record; records are never updated in place, so a
///   second put with the same comment id fails.
/// - `scan_page` returns items in a stable order. A page with no
///   `next_cursor` is the last one.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts one record.
    async fn put(&self, record: &AnalysisRecord) -> Result<(), RecordStoreError>;

    /// Returns the page following `cursor`, or the first page for `None`.
    async fn scan_page(&self, cursor: Option<ScanCursor>) -> Result<ScanPage, RecordStoreError>;
}

/// Opaque position in a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCursor(String);

impl ScanCursor {
    pub fn new(position: impl Into<String>) -> Self {
        Self(position.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<StoredItem>,
    pub next_cursor: Option<ScanCursor>,
}

/// Errors from record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    #[error("failed to write record {comment_id}: {message}")]
    Write { comment_id: String, message: String },

    #[error("failed to scan records: {0}")]
    Scan(String),
}

/// Reads every stored item, following cursors until the last page.
pub async fn scan_all(store: &dyn RecordStore) -> Result<Vec<StoredItem>, RecordStoreError> {
    let mut items = Vec::new();
    let mut cursor = None;
    loop {
        let page = store.scan_page(cursor).await?;
        items.extend(page.items);
        match page.next_cursor {
            Some(next) => {
                tracing::debug!(fetched = items.len(), "scanning for more records");
                cursor = Some(next);
            }
            None => break,
        }
    }
    Ok(items)
}
