//! Feedback HTTP adapter module.
//!
//! Provides the ingestion trigger and the statistics/export read endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, ProcessUploadResponse};
pub use handlers::{FeedbackApiError, FeedbackAppState};
pub use routes::feedback_routes;
