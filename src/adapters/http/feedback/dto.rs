//! HTTP DTOs for feedback endpoints.
//!
//! Statistics are served as the domain structure directly; only the upload
//! summary and errors have their own shapes.

pub use crate::domain::feedback::AggregateStatistics;

use serde::Serialize;

use crate::application::handlers::ProcessUploadResult;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

/// Response body of `POST /process`.
///
/// Counter fields are present only when rows were actually processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessUploadResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_skipped_empty: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_analysis_failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successfully_analyzed_and_stored: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_write_failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_processed: Option<String>,
}

impl From<ProcessUploadResult> for ProcessUploadResponse {
    fn from(result: ProcessUploadResult) -> Self {
        let mut response = Self {
            message: result.message(),
            total_rows: None,
            comments_skipped_empty: None,
            llm_analysis_failed: None,
            successfully_analyzed_and_stored: None,
            record_write_failed: None,
            file_processed: None,
        };
        match result {
            ProcessUploadResult::SkippedEmptyObject => {}
            ProcessUploadResult::NoRows { file } => response.file_processed = Some(file),
            ProcessUploadResult::Processed { file, summary } => {
                response.total_rows = Some(summary.total_rows);
                response.comments_skipped_empty = Some(summary.skipped);
                response.llm_analysis_failed = Some(summary.llm_failed);
                response.successfully_analyzed_and_stored = Some(summary.succeeded);
                response.record_write_failed = Some(summary.write_failed);
                response.file_processed = Some(file);
            }
        }
        response
    }
}
