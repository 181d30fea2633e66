// error.rs
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Failures raised by the vote store itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Vote not found.")]
    NotFound,

    #[error("Vote is already closed.")]
    AlreadyClosed,

    #[error("Unauthorized: Only the creator can close the vote.")]
    Unauthorized,
}

/// Everything a handler can surface to the caller. Store failures keep their
/// identity so each maps to a distinct HTTP status; malformed input is
/// reported separately as a validation failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::AlreadyClosed) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::Unauthorized) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
