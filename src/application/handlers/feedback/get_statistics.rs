//! GetStatisticsHandler - Query handler for aggregate statistics.
//!
//! Scans the whole record store on every call; results are not cached.

use std::sync::Arc;

use crate::domain::feedback::{aggregate, AggregateStatistics, AnalysisRecord};
use crate::ports::{scan_all, RecordStore, RecordStoreError};

/// Handler for computing statistics over all stored records.
pub struct GetStatisticsHandler {
    store: Arc<dyn RecordStore>,
}

impl GetStatisticsHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<AggregateStatistics, RecordStoreError> {
        let items = scan_all(self.store.as_ref()).await?;
        tracing::debug!(items = items.len(), "scanned records for statistics");

        let records: Vec<AnalysisRecord> = items.iter().map(AnalysisRecord::from_item).collect();
        Ok(aggregate(&records))
    }
}
