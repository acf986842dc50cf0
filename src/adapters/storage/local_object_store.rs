//! Local Object Store Adapter
//!
//! Serves objects from a directory tree laid out as `{root}/{bucket}/{key}`.
//! Useful for development and tests; also works against a mounted bucket.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::ports::{ObjectStore, ObjectStoreError};

/// Filesystem-backed object store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves bucket and key to a path under the root.
    ///
    /// Keys with `..`, absolute paths or prefixes are rejected so that a key
    /// can never escape the bucket directory.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, ObjectStoreError> {
        let mut path = self.root.clone();
        for part in [bucket, key] {
            if part.is_empty() {
                return Err(ObjectStoreError::InvalidKey("empty bucket or key".to_string()));
            }
            for component in Path::new(part).components() {
                match component {
                    Component::Normal(segment) => path.push(segment),
                    Component::CurDir => {}
                    _ => return Err(ObjectStoreError::InvalidKey(format!("{bucket}/{key}"))),
                }
            }
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let path = self.object_path(bucket, key)?;
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => ObjectStoreError::Io(format!("{}: {}", path.display(), e)),
        })
    }
}
