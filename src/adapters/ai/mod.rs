//! Model Invoker Adapters.
//!
//! Implementations of the ModelInvoker port.
//!
//! ## Available Adapters
//!
//! - `BedrockTitanInvoker` - Bedrock runtime, Titan text models
//! - `OpenAIInvoker` - OpenAI-compatible chat completions
//! - `MockModelInvoker` - Configurable mock for testing and local runs

mod bedrock_provider;
mod mock_provider;
mod openai_provider;

pub use bedrock_provider::{BedrockConfig, BedrockTitanInvoker};
pub use mock_provider::{MockCall, MockModelInvoker, DEFAULT_MOCK_REPLY};
pub use openai_provider::{OpenAIConfig, OpenAIInvoker};
