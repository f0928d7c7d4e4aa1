//! Business logic for the chatbot backend.
//!
//! Defines the repository and provider ports and the services built on
//! them. Never depends on chatbot-infra; concrete adapters are injected.

pub mod chat;
pub mod llm;
