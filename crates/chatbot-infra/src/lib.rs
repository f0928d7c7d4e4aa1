//! Infrastructure layer for the chatbot backend.
//!
//! Contains implementations of the ports defined in `chatbot-core`:
//! SQLite storage, the OpenAI-compatible model provider, and
//! configuration loading.

pub mod config;
pub mod llm;
pub mod sqlite;
