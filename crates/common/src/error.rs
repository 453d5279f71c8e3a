//! Common error types and handling for the portfolio API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message returned for every error that does not carry a caller-facing message
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the portfolio API
///
/// Every variant except `Database` and `Internal` carries a message meant
/// for the caller. Those two are rendered with [`GENERIC_ERROR_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Error::Database(_) | Error::Upload(_) | Error::Store(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error kind used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Database(_) => "DATABASE_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Error::Timeout(_) => "TIMEOUT",
            Error::Upload(_) => "UPLOAD_ERROR",
            Error::Store(_) => "STORE_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg)
            | Error::NotFound(msg)
            | Error::PayloadTooLarge(msg)
            | Error::Timeout(msg)
            | Error::Upload(msg)
            | Error::Store(msg) => msg.clone(),
            Error::Database(_) | Error::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.error_code(), "Internal server error");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Request rejected");
        }

        let body = Json(json!({
            "success": false,
            "message": self.public_message(),
        }));

        (status, body).into_response()
    }
}
