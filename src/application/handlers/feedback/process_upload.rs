//! ProcessUploadHandler - Ingests an uploaded comment table.
//!
//! Accepts either an object-created notification or a direct bucket/key
//! request, reads the object, parses its rows and hands them to the
//! [`BatchRunner`].

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::run_batch::{BatchRunner, BatchSummary};
use crate::domain::feedback::{parse_comment_rows, IngestionError};
use crate::ports::ObjectStore;

/// What triggered an ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTrigger {
    /// Storage notification for a newly created object.
    ObjectCreated {
        bucket: String,
        key: String,
        size: Option<u64>,
    },
    /// Explicit request naming an object.
    Direct { bucket: String, key: String },
}

impl UploadTrigger {
    /// Parses a trigger payload.
    ///
    /// Notifications look like `{"Records":[{"s3":{"bucket":{"name":..},
    /// "object":{"key":..,"size":..}}}]}`; only the first record is used and
    /// its key is URL-decoded (`+` is a space). Direct requests look like
    /// `{"bucket_name":..,"object_key":..}`.
    pub fn from_payload(payload: &Value) -> Result<Self, ProcessUploadError> {
        if let Some(s3) = payload
            .get("Records")
            .and_then(|records| records.get(0))
            .and_then(|record| record.get("s3"))
        {
            let bucket = s3
                .get("bucket")
                .and_then(|b| b.get("name"))
                .and_then(Value::as_str);
            let object = s3.get("object");
            let key = object.and_then(|o| o.get("key")).and_then(Value::as_str);
            let size = object.and_then(|o| o.get("size")).and_then(Value::as_u64);

            return match (bucket, key) {
                (Some(bucket), Some(key)) if !bucket.is_empty() && !key.is_empty() => {
                    Ok(Self::ObjectCreated {
                        bucket: bucket.to_string(),
                        key: decode_object_key(key)?,
                        size,
                    })
                }
                _ => Err(invalid_trigger()),
            };
        }

        let bucket = payload.get("bucket_name").and_then(Value::as_str);
        let key = payload.get("object_key").and_then(Value::as_str);
        match (bucket, key) {
            (Some(bucket), Some(key)) if !bucket.is_empty() && !key.is_empty() => Ok(Self::Direct {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(invalid_trigger()),
        }
    }

    pub fn bucket(&self) -> &str {
        match self {
            Self::ObjectCreated { bucket, .. } | Self::Direct { bucket, .. } => bucket,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::ObjectCreated { key, .. } | Self::Direct { key, .. } => key,
        }
    }

    /// `s3://bucket/key` form used in summaries.
    pub fn location(&self) -> String {
        format!("s3://{}/{}", self.bucket(), self.key())
    }
}

fn invalid_trigger() -> ProcessUploadError {
    ProcessUploadError::InvalidTrigger(
        "Invalid event structure. Expected an object-created notification or {\"bucket_name\", \"object_key\"}."
            .to_string(),
    )
}

fn decode_object_key(raw: &str) -> Result<String, ProcessUploadError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|key| key.into_owned())
        .map_err(|e| ProcessUploadError::InvalidTrigger(format!("object key is not valid UTF-8: {e}")))
}

/// Result of a processed trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessUploadResult {
    /// The notification reported a zero-byte object; nothing was read.
    SkippedEmptyObject,
    /// The table had a header but no data rows.
    NoRows { file: String },
    /// Every row was analyzed and stored.
    Processed { file: String, summary: BatchSummary },
}

impl ProcessUploadResult {
    pub fn message(&self) -> String {
        match self {
            Self::SkippedEmptyObject => "Skipped 0-byte file.".to_string(),
            Self::NoRows { .. } => {
                "No comments processed as no rows were found after the header.".to_string()
            }
            Self::Processed { summary, .. } => format!(
                "CSV processing complete. Total comments found: {}.",
                summary.total_rows
            ),
        }
    }
}

/// Errors that stop an ingestion before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessUploadError {
    #[error("{0}")]
    InvalidTrigger(String),

    #[error("Event bucket '{actual}' does not match configured bucket '{expected}'")]
    BucketMismatch { expected: String, actual: String },

    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

/// Handler for ingestion triggers.
pub struct ProcessUploadHandler {
    objects: Arc<dyn ObjectStore>,
    runner: Arc<BatchRunner>,
    model_id: String,
    /// When set, triggers naming any other bucket are rejected.
    required_bucket: Option<String>,
}

impl ProcessUploadHandler {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        runner: Arc<BatchRunner>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            objects,
            runner,
            model_id: model_id.into(),
            required_bucket: None,
        }
    }

    /// Only accept triggers for `bucket`.
    pub fn with_required_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.required_bucket = Some(bucket.into());
        self
    }

    pub async fn handle(
        &self,
        trigger: UploadTrigger,
    ) -> Result<ProcessUploadResult, ProcessUploadError> {
        tracing::info!(bucket = trigger.bucket(), key = trigger.key(), "processing upload");

        if let UploadTrigger::ObjectCreated { size: Some(0), .. } = &trigger {
            tracing::info!(key = trigger.key(), "skipping 0-byte object");
            return Ok(ProcessUploadResult::SkippedEmptyObject);
        }

        if let Some(expected) = &self.required_bucket {
            if expected != trigger.bucket() {
                return Err(ProcessUploadError::BucketMismatch {
                    expected: expected.clone(),
                    actual: trigger.bucket().to_string(),
                });
            }
        }

        let bytes = self
            .objects
            .get(trigger.bucket(), trigger.key())
            .await
            .map_err(|e| IngestionError::SourceUnavailable {
                message: e.to_string(),
            })?;

        let rows = parse_comment_rows(&bytes).map_err(|e| {
            tracing::error!(key = trigger.key(), error = %e, "could not read comment rows");
            e
        })?;
        tracing::info!(rows = rows.len(), "parsed rows (including empty comments)");

        if rows.is_empty() {
            return Ok(ProcessUploadResult::NoRows {
                file: trigger.location(),
            });
        }

        let summary = self.runner.run(&rows, &self.model_id).await;

        Ok(ProcessUploadResult::Processed {
            file: trigger.location(),
            summary,
        })
    }
}
