//! Receiver error types with HTTP status code mapping.
//!
//! [`ReceiverError`] is the central error type for the service. Malformed
//! input is answered with a structured JSON body; storage failures surface
//! as a bare `500` with no custom message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// ```json
/// { "status": "Error", "message": "Invalid JSON" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"Error"`.
    pub status: String,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant        | HTTP Status               | Body                 |
/// |----------------|---------------------------|----------------------|
/// | `InvalidJson`  | 400 Bad Request           | [`ErrorResponse`]    |
/// | `Storage`      | 500 Internal Server Error | empty                |
/// | `Config`       | 500 Internal Server Error | empty                |
#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    /// Request body could not be parsed as JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Failure while talking to the SQLite store.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ReceiverError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::InvalidJson(_) => {
                let body = ErrorResponse {
                    status: "Error".to_string(),
                    message: "Invalid JSON".to_string(),
                };
                (status, axum::Json(body)).into_response()
            }
            Self::Storage(ref e) => {
                tracing::error!(error = %e, "failed to store webhook payload");
                status.into_response()
            }
            Self::Config(ref msg) => {
                tracing::error!(error = %msg, "configuration error");
                status.into_response()
            }
        }
    }
}
