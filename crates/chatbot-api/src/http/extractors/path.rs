//! Conversation id path parameter.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::http::error::AppError;

/// A conversation id taken from the `{id}` path segment.
///
/// Ids that do not parse as integers address no resource, so they are
/// rejected with 404 rather than 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ConversationId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse_id(&raw).map(ConversationId)
    }
}

/// Parse a path id, mapping anything non-integer to `NotFound`.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| AppError::NotFound)
}
