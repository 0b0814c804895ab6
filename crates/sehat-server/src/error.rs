use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sehat_assess::error::AssessError;
use sehat_storage::error::StorageError;

/// Message returned for any failure in the create-screening pipeline.
pub const SCREENING_FAILED: &str = "Failed to process screening";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was refused before reaching the handler logic, with
    /// the status axum chose (400 for malformed multipart, 413 when over the
    /// body limit).
    Rejected { status: StatusCode, message: String },
    Internal(String),
    /// Create-screening failed after the form was read. The cause is logged;
    /// the client only sees [`SCREENING_FAILED`].
    ScreeningFailed(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Rejected { status, message } => {
                tracing::warn!(status = status.as_u16(), "request rejected: {message}");
                (status, message)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::ScreeningFailed(msg) => {
                tracing::error!(cause = %msg, "screening failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SCREENING_FAILED.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<AssessError> for ApiError {
    fn from(e: AssessError) -> Self {
        ApiError::ScreeningFailed(e.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Rejected {
            status: e.status(),
            message: e.body_text(),
        }
    }
}
