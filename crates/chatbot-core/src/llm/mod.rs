//! LLM provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `ModelClient`: the text-in/text-out client the chat service talks to

pub mod box_provider;
pub mod client;
pub mod provider;
