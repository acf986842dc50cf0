//! BatchRunner - Analyzes and stores every row of an ingested table.
//!
//! Rows are processed one at a time in source order. Each row yields exactly
//! one stored record; a failed analysis or a failed write affects only that
//! row.

use std::sync::Arc;

use serde::Serialize;

use super::analyze_comment::CommentAnalyzer;
use crate::domain::feedback::{AnalysisRecord, CommentRow};
use crate::ports::RecordStore;

/// Per-outcome counters for one batch.
///
/// `succeeded` counts rows that were analyzed *and* stored. `skipped` and
/// `llm_failed` count regardless of whether the write went through, and
/// every failed write is also counted in `write_failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub skipped: usize,
    pub llm_failed: usize,
    pub succeeded: usize,
    pub write_failed: usize,
}

/// Runs the analyzer over a batch of rows and persists the results.
pub struct BatchRunner {
    analyzer: CommentAnalyzer,
    store: Arc<dyn RecordStore>,
}

impl BatchRunner {
    pub fn new(analyzer: CommentAnalyzer, store: Arc<dyn RecordStore>) -> Self {
        Self { analyzer, store }
    }

    pub async fn run(&self, rows: &[CommentRow], model_id: &str) -> BatchSummary {
        let mut summary = BatchSummary {
            total_rows: rows.len(),
            ..BatchSummary::default()
        };

        for row in rows {
            let outcome = self
                .analyzer
                .analyze(row.text(), row.original_row_index(), model_id)
                .await;
            let record = AnalysisRecord::from_outcome(row, model_id, &outcome);

            if outcome.is_skipped() {
                summary.skipped += 1;
            } else if outcome.is_failure() {
                summary.llm_failed += 1;
            }

            match self.store.put(&record).await {
                Ok(()) => {
                    if outcome.is_success() {
                        summary.succeeded += 1;
                    }
                    tracing::info!(
                        row = row.original_row_index(),
                        comment_id = record.comment_id().short(),
                        sentiment = record.sentiment(),
                        "stored analysis record"
                    );
                }
                Err(err) => {
                    summary.write_failed += 1;
                    tracing::error!(
                        row = row.original_row_index(),
                        comment_id = %record.comment_id(),
                        error = %err,
                        "failed to store analysis record"
                    );
                }
            }
        }

        tracing::info!(
            total_rows = summary.total_rows,
            skipped = summary.skipped,
            llm_failed = summary.llm_failed,
            succeeded = summary.succeeded,
            write_failed = summary.write_failed,
            "batch finished"
        );

        summary
    }
}
