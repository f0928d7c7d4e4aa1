//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! { "code": 0, "message": "success", "data": { ... } }
//! ```
//! `data` is always present and is `null` on errors and on deletes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope code for a successful response.
pub const SUCCESS_CODE: u32 = 0;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// 0 on success, otherwise the error code (1001-1003).
    pub code: u32,
    pub message: String,
    pub data: Option<T>,

    /// HTTP status; not serialized.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a 200 success response with data.
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// Override the HTTP status (e.g. 201 for creates).
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl ApiResponse<()> {
    /// Success with `data: null`.
    pub fn empty() -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: None,
            status: StatusCode::OK,
        }
    }

    /// Create an error response (no data).
    pub fn error(status: StatusCode, code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"code":1003,"message":"failed to serialize response","data":null}"#.to_string()
        });

        (
            self.status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
