//! Feedback Analyzer - Batch classification of free-text feedback comments
//!
//! Uploaded spreadsheets of comments are classified one row at a time by a
//! hosted language model. Each verdict (sentiment, category, importance,
//! risk flag) is persisted as an analysis record, and the accumulated
//! records are served back as aggregate statistics or a CSV export.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
