//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresRecordStore` - Analysis records in `comment_analyses`

mod record_store;

pub use record_store::PostgresRecordStore;
