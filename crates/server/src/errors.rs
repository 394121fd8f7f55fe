use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by handlers; rendered as `{"error": message}`.
///
/// `message` is always a static, client-safe string. The underlying cause is
/// logged when the error is built and never sent to the client.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a service error to 400 (`invalid`) or 500 (`failed`).
    pub fn from_service(err: ServiceError, invalid: &str, failed: &str) -> Self {
        match err {
            ServiceError::Validation(detail) => {
                warn!(event = "validation_failed", %detail, "rejected request");
                Self::bad_request(invalid)
            }
            ServiceError::Storage(detail) => {
                error!(event = "storage_failed", error = %detail, "storage operation failed");
                Self::internal(failed)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage init failed: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
