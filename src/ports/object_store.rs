//! Object Store Port - Read access to uploaded source files.

use async_trait::async_trait;
use thiserror::Error;

/// Port for fetching uploaded objects by bucket and key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the full object body.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// Errors from object store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectStoreError {
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Bucket or key cannot be mapped to a location.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("HTTP error: {0}")]
    Http(String),
}
