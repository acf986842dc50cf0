//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod feedback;

pub use feedback::{
    // Commands
    BatchRunner, BatchSummary, CommentAnalyzer, ProcessUploadError, ProcessUploadHandler,
    ProcessUploadResult, UploadTrigger,
    // Queries
    ExportResultsError, ExportResultsHandler, GetStatisticsHandler, EXPORT_FILE_NAME,
};
