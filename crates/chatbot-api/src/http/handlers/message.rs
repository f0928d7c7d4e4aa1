//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/conversations/{id}/messages - Full history, oldest first
//! - POST /api/v1/conversations/{id}/messages - One non-streaming turn

use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;

use chatbot_types::chat::{ChatMessage, Exchange};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::extractors::path::{parse_id, ConversationId};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for both message-posting endpoints.
///
/// `content` is loosely typed so that a number or an object is reported
/// as invalid content rather than a malformed body.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub content: Option<Value>,
}

impl SendMessageRequest {
    /// The content, if it is a string with at least one non-whitespace char.
    pub fn validated_content(&self) -> Result<&str, AppError> {
        match &self.content {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            _ => Err(AppError::Validation(
                "message content must not be empty".to_string(),
            )),
        }
    }
}

/// GET /api/v1/conversations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    ConversationId(id): ConversationId,
) -> Result<ApiResponse<Vec<ChatMessage>>, AppError> {
    let messages = state.chat_service.list_messages(id).await?;
    Ok(ApiResponse::success(messages))
}

/// POST /api/v1/conversations/{id}/messages
///
/// Content is checked before the conversation, so an empty message to a
/// missing conversation is a 400.
pub async fn send_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<SendMessageRequest>,
) -> Result<ApiResponse<Exchange>, AppError> {
    let content = body.validated_content()?;
    let id = parse_id(&raw_id)?;

    let exchange = state.chat_service.send_message(id, content).await?;
    Ok(ApiResponse::success(exchange))
}
