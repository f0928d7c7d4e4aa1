//! Liveness endpoint.
//!
//! GET /health and GET /api/v1/health
//!
//! Reports ok only when storage answers a trivial query and the model
//! credential is present and well formed.

use axum::extract::State;
use serde::Serialize;

use chatbot_types::error::ChatError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<ApiResponse<HealthStatus>, AppError> {
    state.chat_service.health().await?;
    state
        .chat_service
        .model()
        .check_credentials()
        .map_err(ChatError::from)?;

    Ok(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
