//! HTTP routes for feedback endpoints.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use super::handlers::{export_csv, get_statistics, health, process_upload, FeedbackAppState};

/// Creates the feedback router with all routes.
///
/// `read_timeout` bounds the read endpoints; ingestion runs as long as the
/// batch takes.
pub fn feedback_routes(state: FeedbackAppState, read_timeout: Duration) -> Router {
    let reads = Router::new()
        // GET /stats
        .route("/stats", get(get_statistics))
        // GET /export/csv
        .route("/export/csv", get(export_csv))
        .layer(TimeoutLayer::new(read_timeout));

    Router::new()
        // POST /process
        .route("/process", post(process_upload))
        // GET /health
        .route("/health", get(health))
        .merge(reads)
        .with_state(state)
}
