//! ExportResultsHandler - Query handler for the CSV export.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::feedback::{render_csv, ExportError};
use crate::ports::{scan_all, RecordStore, RecordStoreError};

/// File name offered to clients downloading the export.
pub const EXPORT_FILE_NAME: &str = "feedback_analysis.csv";

#[derive(Debug, Error)]
pub enum ExportResultsError {
    #[error(transparent)]
    Store(#[from] RecordStoreError),

    #[error(transparent)]
    Render(#[from] ExportError),
}

/// Handler rendering every stored record, skipped rows included, as CSV.
pub struct ExportResultsHandler {
    store: Arc<dyn RecordStore>,
}

impl ExportResultsHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<String, ExportResultsError> {
        let items = scan_all(self.store.as_ref()).await?;
        tracing::debug!(records = items.len(), "exporting records");
        Ok(render_csv(&items)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRecordStore;
    use crate::domain::feedback::{columns, AnalysisOutcome, AnalysisRecord, CommentRow, NO_DATA_MESSAGE};
    use crate::ports::RecordStore;

    #[tokio::test]
    async fn exports_skipped_rows_too() {
        let store = InMemoryRecordStore::new();
        let skipped = AnalysisRecord::from_outcome(
            &CommentRow::new(None, 2),
            "titan",
            &AnalysisOutcome::Skipped { reason: "empty".into() },
        );
        store.put(&skipped).await.unwrap();
        let handler = ExportResultsHandler::new(Arc::new(store));

        let csv = handler.handle().await.unwrap();

        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"Skipped - Empty\""));
    }

    #[tokio::test]
    async fn empty_store_exports_placeholder() {
        let handler = ExportResultsHandler::new(Arc::new(InMemoryRecordStore::new()));

        let csv = handler.handle().await.unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), columns::ALL.len());
        assert_eq!(&rows[0][0], NO_DATA_MESSAGE);
    }
}
