//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ModelInvoker` - Hosted text-generation model
//! - `RecordStore` - Durable analysis record storage with paginated scans
//! - `ObjectStore` - Uploaded source files

mod model_invoker;
mod object_store;
mod record_store;

pub use model_invoker::{GenerationConfig, ModelError, ModelInvoker};
pub use object_store::{ObjectStore, ObjectStoreError};
pub use record_store::{scan_all, RecordStore, RecordStoreError, ScanCursor, ScanPage};
