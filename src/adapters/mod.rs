//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Hosted model invokers (Bedrock, OpenAI, mock)
//! - `http` - REST endpoints for ingestion, statistics and export
//! - `postgres` - Durable analysis record store
//! - `storage` - Object stores and the in-memory record store

pub mod ai;
pub mod http;
pub mod postgres;
pub mod storage;
