//! Feedback handlers - Ingestion, analysis and read-side queries.

mod analyze_comment;
mod export_results;
mod get_statistics;
mod process_upload;
mod run_batch;

pub use analyze_comment::CommentAnalyzer;
pub use export_results::{ExportResultsError, ExportResultsHandler, EXPORT_FILE_NAME};
pub use get_statistics::GetStatisticsHandler;
pub use process_upload::{
    ProcessUploadError, ProcessUploadHandler, ProcessUploadResult, UploadTrigger,
};
pub use run_batch::{BatchRunner, BatchSummary};
