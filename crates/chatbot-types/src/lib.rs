//! Shared domain types for the chatbot backend.
//!
//! Conversations, messages, LLM request/stream shapes, relay events,
//! configuration, and the error taxonomy shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod relay;
