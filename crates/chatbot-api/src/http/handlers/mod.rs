//! HTTP request handlers for the REST API.

pub mod conversation;
pub mod health;
pub mod message;
pub mod stream;

use crate::http::error::AppError;

/// Fallback for unmatched routes: the 404 envelope.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
