// src/api/error.rs
// Closed error taxonomy for the whole service, with one deterministic
// mapping to HTTP status codes. Handlers return ApiResult and let the
// IntoResponse impl do the rest; nothing reaches axum unmapped.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing client input. Always recoverable.
    #[error("{0}")]
    Validation(String),

    /// Referenced persona id does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Integrity or I/O failure in the storage layer. The failed statement
    /// rolls back on its own; no partial record survives.
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The named environment credential is not set. Fatal to the request,
    /// not to the process.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// Transport-level failure reaching the upstream (timeout, connect).
    #[error("failed to reach the chat completions API: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered with a non-success status; its body is
    /// forwarded verbatim in the response `details`.
    #[error("chat completions API returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream answered 2xx but the payload had an unexpected shape.
    #[error("unexpected response from the chat completions API: {0}")]
    UpstreamProtocol(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// The single transport mapping. Testable without a server running.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::MissingCredential(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamStatus { .. }
            | ApiError::UpstreamProtocol(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }

        let mut body = json!({
            "error": true,
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        if let ApiError::UpstreamStatus { body: upstream_body, .. } = &self {
            body["details"] = json!(upstream_body);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
