//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Ingestion (upload processing, batch analysis) is the write side; statistics
//! and export are read-only queries over the record store.

pub mod handlers;

pub use handlers::{
    BatchRunner, BatchSummary, CommentAnalyzer, ExportResultsError, ExportResultsHandler,
    GetStatisticsHandler, ProcessUploadError, ProcessUploadHandler, ProcessUploadResult,
    UploadTrigger, EXPORT_FILE_NAME,
};
