// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Every identity and storage failure is translated into one of these
/// user-facing categories before it leaves the handler layer.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error (store unreachable or failed)
    StorageUnavailable(String),

    // 500 Internal Server Error (anything else)
    InternalServerError(String),

    // 400 Bad Request (missing or malformed identity fields, bad answers)
    InvalidInput(String),

    // 401 Unauthorized (admin secret mismatch)
    AuthRejected(String),

    // 403 Forbidden (identity already has a persisted result)
    DuplicateIdentity(String),

    // 404 Not Found
    NotFound(String),
}

impl AppError {
    /// The message shown when an identity has already completed the evaluation.
    pub fn already_completed() -> Self {
        AppError::DuplicateIdentity("You have already completed this evaluation.".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
/// Storage and internal details are logged, never returned.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthRejected(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::DuplicateIdentity(msg) => {
                tracing::info!("Rejected duplicate identity");
                (StatusCode::FORBIDDEN, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::StorageUnavailable`.
/// Unique violations are not special-cased here; the recorder maps them.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
