//! Feedback Analyzer HTTP service.

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use feedback_analyzer::adapters::ai::{
    BedrockConfig, BedrockTitanInvoker, MockModelInvoker, OpenAIConfig, OpenAIInvoker,
};
use feedback_analyzer::adapters::http::{api_router, FeedbackAppState};
use feedback_analyzer::adapters::postgres::PostgresRecordStore;
use feedback_analyzer::adapters::storage::{HttpObjectStore, InMemoryRecordStore, LocalObjectStore};
use feedback_analyzer::application::{BatchRunner, CommentAnalyzer, ProcessUploadHandler};
use feedback_analyzer::config::{
    AppConfig, ConfigError, ModelConfig, ModelProvider, RecordBackend, RecordsConfig,
    ServerConfig, StorageBackend, StorageConfig, ValidationError,
};
use feedback_analyzer::ports::{ModelError, ModelInvoker, ObjectStore, ObjectStoreError, RecordStore};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model client setup failed: {0}")]
    Model(#[from] ModelError),

    #[error("Object store setup failed: {0}")]
    ObjectStore(#[from] ObjectStoreError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Server failed: {0}")]
    Server(#[from] std::io::Error),
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_invoker(config: &ModelConfig) -> Result<Arc<dyn ModelInvoker>, StartupError> {
    let invoker: Arc<dyn ModelInvoker> = match config.provider {
        ModelProvider::Bedrock => {
            let mut bedrock = BedrockConfig::new(&config.region).with_timeout(config.timeout());
            if let Some(key) = &config.api_key {
                bedrock = bedrock.with_api_key(key.expose_secret().clone());
            }
            if let Some(endpoint) = &config.endpoint {
                bedrock = bedrock.with_endpoint(endpoint);
            }
            Arc::new(BedrockTitanInvoker::new(bedrock)?)
        }
        ModelProvider::OpenAI => {
            let key = config
                .api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("MODEL__API_KEY"))?;
            let mut openai =
                OpenAIConfig::new(key.expose_secret().clone()).with_timeout(config.timeout());
            if let Some(endpoint) = &config.endpoint {
                openai = openai.with_base_url(endpoint);
            }
            Arc::new(OpenAIInvoker::new(openai)?)
        }
        ModelProvider::Mock => Arc::new(MockModelInvoker::new()),
    };
    Ok(invoker)
}

fn build_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StartupError> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Local => Arc::new(LocalObjectStore::new(&config.root_dir)),
        StorageBackend::Http => {
            let base_url = config
                .base_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("STORAGE__BASE_URL"))?;
            Arc::new(HttpObjectStore::new(
                base_url,
                config.bearer_token.clone(),
                config.timeout(),
            )?)
        }
    };
    Ok(store)
}

async fn build_record_store(config: &RecordsConfig) -> Result<Arc<dyn RecordStore>, StartupError> {
    match config.backend {
        RecordBackend::Memory => {
            info!("Using in-memory record store; records are lost on restart");
            Ok(Arc::new(InMemoryRecordStore::with_page_size(
                config.page_size as usize,
            )))
        }
        RecordBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("RECORDS__URL"))?;
            let pool = PostgresRecordStore::connect(url, config.max_connections).await?;
            if config.run_migrations {
                PostgresRecordStore::migrate(&pool).await?;
                info!("Database migrations applied");
            }
            Ok(Arc::new(PostgresRecordStore::new(pool, config.page_size)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let invoker = build_invoker(&config.model)?;
    let objects = build_object_store(&config.storage)?;
    let records = build_record_store(&config.records).await?;

    let analyzer = CommentAnalyzer::new(invoker, config.model.generation_config());
    let runner = Arc::new(BatchRunner::new(analyzer, records.clone()));
    let mut upload_handler =
        ProcessUploadHandler::new(objects, runner, config.model.model_id.clone());
    if config.storage.enforce_bucket {
        upload_handler = upload_handler.with_required_bucket(config.storage.bucket.clone());
    }

    let state = FeedbackAppState {
        record_store: records,
        upload_handler: Arc::new(upload_handler),
    };
    let app = api_router(
        state,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        model_id = %config.model.model_id,
        bucket = %config.storage.bucket,
        "Feedback analyzer listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    run(config).await
}
