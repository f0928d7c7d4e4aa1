//! HTTP/REST API layer.
//!
//! Axum-based REST API at `/api/v1/` with the `{code, message, data}`
//! envelope, SSE streaming for replies, and permissive CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
