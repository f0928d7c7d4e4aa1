//! Conversation CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/conversations       - List conversations (paginated)
//! - POST   /api/v1/conversations       - Create a conversation
//! - DELETE /api/v1/conversations/{id}  - Delete a conversation and its messages

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use chatbot_types::chat::{Conversation, ConversationPage};

use crate::http::error::AppError;
use crate::http::extractors::path::ConversationId;
use crate::http::extractors::query::PageQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/conversations?page&limit
///
/// Unreadable query strings fall back to the default page.
pub async fn list_conversations(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiResponse<ConversationPage>, AppError> {
    let page = query
        .map(|Query(q)| q.to_page_request())
        .unwrap_or_default();

    let result = state.chat_service.list_conversations(page).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/conversations
///
/// The body is optional. A missing, null, or blank title gets the
/// placeholder; a non-string title is stored as its JSON text.
pub async fn create_conversation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<Conversation>, AppError> {
    let title = requested_title(&body)?;
    let conversation = state.chat_service.create_conversation(title).await?;

    tracing::info!(conversation_id = conversation.id, "Conversation created via API");
    Ok(ApiResponse::success(conversation).with_status(StatusCode::CREATED))
}

/// DELETE /api/v1/conversations/{id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    ConversationId(id): ConversationId,
) -> Result<ApiResponse<()>, AppError> {
    state.chat_service.delete_conversation(id).await?;
    Ok(ApiResponse::empty())
}

/// Pull the title out of a create body.
fn requested_title(body: &[u8]) -> Result<Option<String>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))?;

    Ok(match value.get("title") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    })
}
