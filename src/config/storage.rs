//! Object storage configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where uploaded spreadsheets are read from
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Objects live under `root_dir/<bucket>/<key>`
    #[default]
    Local,
    /// Objects are fetched from an S3-compatible HTTP endpoint
    Http,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Bucket that uploads are expected to arrive in
    #[serde(default)]
    pub bucket: String,

    /// Reject triggers that name a different bucket
    #[serde(default = "default_enforce_bucket")]
    pub enforce_bucket: bool,

    /// Root directory for the local backend
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Endpoint for the http backend
    pub base_url: Option<String>,

    /// Optional bearer token for the http backend
    pub bearer_token: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bucket.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BUCKET"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        match self.backend {
            StorageBackend::Local => {
                if self.root_dir.trim().is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__ROOT_DIR"));
                }
            }
            StorageBackend::Http => {
                let url = self
                    .base_url
                    .as_deref()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ValidationError::MissingRequired("STORAGE__BASE_URL"))?;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidStorageUrl);
                }
            }
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: String::new(),
            enforce_bucket: default_enforce_bucket(),
            root_dir: default_root_dir(),
            base_url: None,
            bearer_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_enforce_bucket() -> bool {
    false
}

fn default_root_dir() -> String {
    "./data/objects".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bucket() -> StorageConfig {
        StorageConfig {
            bucket: "feedback-uploads".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn bucket_is_required() {
        assert_eq!(
            StorageConfig::default().validate(),
            Err(ValidationError::MissingRequired("STORAGE__BUCKET"))
        );
        assert!(with_bucket().validate().is_ok());
    }

    #[test]
    fn http_backend_needs_base_url() {
        let config = StorageConfig {
            backend: StorageBackend::Http,
            ..with_bucket()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STORAGE__BASE_URL"))
        );

        let config = StorageConfig {
            backend: StorageBackend::Http,
            base_url: Some("ftp://objects".to_string()),
            ..with_bucket()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStorageUrl));

        let config = StorageConfig {
            backend: StorageBackend::Http,
            base_url: Some("http://localhost:9000".to_string()),
            ..with_bucket()
        };
        assert!(config.validate().is_ok());
    }
}
