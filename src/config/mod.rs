//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `FEEDBACK_ANALYZER` prefix; nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use feedback_analyzer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Analyzing uploads to {}", config.storage.bucket);
//! ```

mod error;
mod model;
mod records;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use model::{ModelConfig, ModelProvider};
pub use records::{RecordBackend, RecordsConfig};
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults so that a missing required value is reported
/// by [`AppConfig::validate`] with the variable name, not as a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Where uploaded spreadsheets are read from
    #[serde(default)]
    pub storage: StorageConfig,

    /// Where analysis records are persisted
    #[serde(default)]
    pub records: RecordsConfig,

    /// Hosted model used for classification
    #[serde(default)]
    pub model: ModelConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `FEEDBACK_ANALYZER__*` variables:
    ///
    /// - `FEEDBACK_ANALYZER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FEEDBACK_ANALYZER__MODEL__MODEL_ID=...` -> `model.model_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FEEDBACK_ANALYZER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid or missing value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.records.validate()?;
        self.model.validate()?;
        Ok(())
    }
}
