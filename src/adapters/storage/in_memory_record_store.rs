//! In-Memory Record Store Adapter
//!
//! Keeps stored items in insertion order and pages through them by offset.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::feedback::{AnalysisRecord, StoredItem};
use crate::ports::{RecordStore, RecordStoreError, ScanCursor, ScanPage};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Default)]
struct Inner {
    items: Vec<StoredItem>,
    ids: HashSet<String>,
}

/// In-memory record store.
#[derive(Debug, Clone)]
pub struct InMemoryRecordStore {
    inner: Arc<RwLock<Inner>>,
    page_size: usize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Store whose scans return at most `page_size` items per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            page_size: page_size.max(1),
        }
    }

    /// Inserts a raw item, as if written by another producer.
    pub async fn insert_item(&self, item: StoredItem) {
        let mut inner = self.inner.write().await;
        if let Some(id) = item.get("CommentID").and_then(|v| v.as_str()) {
            inner.ids.insert(id.to_string());
        }
        inner.items.push(item);
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every stored item, in insertion order.
    pub async fn items(&self) -> Vec<StoredItem> {
        self.inner.read().await.items.clone()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: &AnalysisRecord) -> Result<(), RecordStoreError> {
        let mut inner = self.inner.write().await;
        let id = record.comment_id().to_string();
        if !inner.ids.insert(id.clone()) {
            return Err(RecordStoreError::Write {
                comment_id: id,
                message: "record already exists".to_string(),
            });
        }
        inner.items.push(record.to_item());
        Ok(())
    }

    async fn scan_page(&self, cursor: Option<ScanCursor>) -> Result<ScanPage, RecordStoreError> {
        let offset = match &cursor {
            Some(c) => c
                .as_str()
                .parse::<usize>()
                .map_err(|_| RecordStoreError::Scan(format!("invalid cursor: {}", c.as_str())))?,
            None => 0,
        };

        let inner = self.inner.read().await;
        let end = (offset + self.page_size).min(inner.items.len());
        let items = inner.items.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let next_cursor = (end < inner.items.len()).then(|| ScanCursor::new(end.to_string()));

        Ok(ScanPage { items, next_cursor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::{AnalysisOutcome, CommentRow};
    use crate::ports::scan_all;

    fn record(row: i64) -> AnalysisRecord {
        AnalysisRecord::from_outcome(
            &CommentRow::new(None, row),
            "titan",
            &AnalysisOutcome::Skipped { reason: "empty".into() },
        )
    }

    #[tokio::test]
    async fn scan_all_follows_pages() {
        let store = InMemoryRecordStore::with_page_size(2);
        for row in 2..7 {
            store.put(&record(row)).await.unwrap();
        }

        let first = store.scan_page(None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.next_cursor.is_some());

        let all = scan_all(&store).await.unwrap();
        let rows: Vec<i64> = all
            .iter()
            .map(|item| AnalysisRecord::from_item(item).original_csv_row_index())
            .collect();
        assert_eq!(rows, vec![2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn empty_store_scans_to_nothing() {
        let store = InMemoryRecordStore::new();
        assert!(scan_all(&store).await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = InMemoryRecordStore::new();
        let r = record(2);

        store.put(&r).await.unwrap();
        let err = store.put(&r).await.unwrap_err();

        assert!(matches!(err, RecordStoreError::Write { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn bad_cursor_is_scan_error() {
        let store = InMemoryRecordStore::new();
        let err = store
            .scan_page(Some(ScanCursor::new("not-a-number")))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::Scan(_)));
    }
}
