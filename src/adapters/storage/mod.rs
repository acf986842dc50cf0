//! Storage Adapters
//!
//! Implementations of the ObjectStore and RecordStore ports that need no
//! database.
//!
//! ## Available Adapters
//!
//! - **LocalObjectStore** - Uploaded files from a local directory tree
//! - **HttpObjectStore** - Uploaded files from an S3-compatible HTTP endpoint
//! - **InMemoryRecordStore** - Analysis records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryRecordStore, LocalObjectStore};
//!
//! let objects = LocalObjectStore::new("./data/objects");
//! let records = InMemoryRecordStore::new();
//! ```

mod http_object_store;
mod in_memory_record_store;
mod local_object_store;

pub use http_object_store::HttpObjectStore;
pub use in_memory_record_store::InMemoryRecordStore;
pub use local_object_store::LocalObjectStore;
