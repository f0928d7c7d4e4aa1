//! Application layer for the chatbot backend: the axum REST/SSE API, the
//! CLI commands, and the state that wires infra adapters into services.

pub mod cli;
pub mod http;
pub mod state;
