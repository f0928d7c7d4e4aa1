//! JSON body extractor whose rejection is the envelope 400.

use axum::extract::FromRequest;

use crate::http::error::AppError;

/// `axum::Json` with rejections mapped to `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
