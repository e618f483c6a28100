//! Unified error handling for the gateway.
//!
//! Provides a unified `AppError` type that converts every failure into a JSON
//! error body with an HTTP status code. All route handlers return
//! `Result<T, AppError>`; nothing is allowed to crash the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body is missing required fields or otherwise malformed.
    #[error("{0}")]
    Validation(String),

    /// No row matches the requested user id.
    #[error("User not found")]
    NotFound,

    /// Constraint violation or backend failure.
    #[error("{0}")]
    Storage(#[from] sqlx::Error),
}

/// JSON error body, `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Storage(err) = &self {
            tracing::error!(error = %err, "storage error");
        }

        let status = match &self {
            Self::Validation(_) | Self::Storage(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound;
        assert_eq!(err.to_string(), "User not found");

        let err = AppError::Validation("missing field `name`".to_string());
        assert_eq!(err.to_string(), "missing field `name`");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::Storage(sqlx::Error::RowNotFound)),
            StatusCode::BAD_REQUEST
        );
    }
}
