//! HTTP handlers for feedback endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::application::handlers::{
    ExportResultsError, ExportResultsHandler, GetStatisticsHandler, ProcessUploadError,
    ProcessUploadHandler, UploadTrigger, EXPORT_FILE_NAME,
};
use crate::ports::{RecordStore, RecordStoreError};

use super::dto::{AggregateStatistics, ErrorResponse, ProcessUploadResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Feedback API error that implements IntoResponse.
#[derive(Debug)]
pub enum FeedbackApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for FeedbackApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            FeedbackApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            FeedbackApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<ProcessUploadError> for FeedbackApiError {
    fn from(error: ProcessUploadError) -> Self {
        match error {
            ProcessUploadError::InvalidTrigger(msg) => FeedbackApiError::BadRequest(msg),
            ProcessUploadError::BucketMismatch { .. } => {
                FeedbackApiError::BadRequest(error.to_string())
            }
            ProcessUploadError::Ingestion(e) if e.is_client_error() => {
                FeedbackApiError::BadRequest(e.to_string())
            }
            ProcessUploadError::Ingestion(e) => FeedbackApiError::Internal(e.to_string()),
        }
    }
}

impl From<RecordStoreError> for FeedbackApiError {
    fn from(error: RecordStoreError) -> Self {
        FeedbackApiError::Internal(format!("Internal server error during stats retrieval: {}", error))
    }
}

impl From<ExportResultsError> for FeedbackApiError {
    fn from(error: ExportResultsError) -> Self {
        FeedbackApiError::Internal(format!("Internal server error during CSV export: {}", error))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing feedback dependencies.
#[derive(Clone)]
pub struct FeedbackAppState {
    pub record_store: Arc<dyn RecordStore>,
    pub upload_handler: Arc<ProcessUploadHandler>,
}

impl FeedbackAppState {
    pub fn get_statistics_handler(&self) -> GetStatisticsHandler {
        GetStatisticsHandler::new(self.record_store.clone())
    }

    pub fn export_results_handler(&self) -> ExportResultsHandler {
        ExportResultsHandler::new(self.record_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /stats
///
/// Returns aggregate statistics over every stored record.
pub async fn get_statistics(
    State(state): State<FeedbackAppState>,
) -> Result<Json<AggregateStatistics>, FeedbackApiError> {
    let stats = state.get_statistics_handler().handle().await.map_err(|e| {
        tracing::error!(error = %e, "statistics query failed");
        FeedbackApiError::from(e)
    })?;
    Ok(Json(stats))
}

/// GET /export/csv
///
/// Returns every stored record as a CSV attachment.
pub async fn export_csv(
    State(state): State<FeedbackAppState>,
) -> Result<impl IntoResponse, FeedbackApiError> {
    let csv = state.export_results_handler().handle().await.map_err(|e| {
        tracing::error!(error = %e, "CSV export failed");
        FeedbackApiError::from(e)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    ))
}

/// POST /process
///
/// Ingests an uploaded file named by an object-created notification or a
/// `{"bucket_name", "object_key"}` request.
pub async fn process_upload(
    State(state): State<FeedbackAppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ProcessUploadResponse>, FeedbackApiError> {
    let trigger = UploadTrigger::from_payload(&payload)?;
    let result = state.upload_handler.handle(trigger).await.map_err(|e| {
        tracing::error!(error = %e, "upload processing failed");
        FeedbackApiError::from(e)
    })?;
    Ok(Json(ProcessUploadResponse::from(result)))
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::IngestionError;

    #[test]
    fn missing_column_maps_to_bad_request() {
        let err = FeedbackApiError::from(ProcessUploadError::Ingestion(
            IngestionError::MissingCommentColumn {
                found: vec!["Text".into()],
            },
        ));
        assert!(matches!(err, FeedbackApiError::BadRequest(msg) if msg.contains("Text")));
    }

    #[test]
    fn unreadable_source_maps_to_internal() {
        let err = FeedbackApiError::from(ProcessUploadError::Ingestion(
            IngestionError::SourceUnavailable {
                message: "object not found".into(),
            },
        ));
        assert!(matches!(err, FeedbackApiError::Internal(_)));
    }

    #[test]
    fn store_errors_map_to_internal() {
        let err = FeedbackApiError::from(RecordStoreError::Scan("connection lost".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
