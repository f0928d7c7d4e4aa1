//! Application error type mapping to HTTP status codes and envelope format.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatbot_types::error::ChatError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors surfaced by the chat service.
    Chat(ChatError),
    /// Request body or parameter failed validation.
    Validation(String),
    /// Unknown route or unparseable resource id.
    NotFound,
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl AppError {
    /// Envelope code for this error.
    pub fn code(&self) -> u32 {
        match self {
            AppError::Chat(e) => e.code(),
            AppError::Validation(_) => 1001,
            AppError::NotFound => 1002,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self.code() {
            1001 => StatusCode::BAD_REQUEST,
            1002 => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Chat(e) => e.public_message(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound => "requested resource not found".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = ?self, status = status.as_u16(), "Request rejected");
        }

        ApiResponse::error(status, self.code(), self.public_message()).into_response()
    }
}

/// Turn a handler panic into the 1003 envelope. Installed through
/// `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ApiResponse::error(
        StatusCode::INTERNAL_SERVER_ERROR,
        1003,
        "internal server error",
    )
    .into_response()
}
