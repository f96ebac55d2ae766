//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::chat::ResponseShapeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed `error` text carried by every 5xx response
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Required input missing or empty
    #[error("{0}")]
    Validation(String),

    /// Transport failure or non-2xx status from the chat-completion API
    #[error("Error calling chat completion API: {0}")]
    Upstream(String),

    /// Successful upstream response without `choices[0].message.content`
    #[error("Malformed chat completion response: {0}")]
    MalformedResponse(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request body larger than the configured limit
    #[error("Request body too large. The limit is {0} bytes.")]
    PayloadTooLarge(usize),
}

/// Error response structure
///
/// 4xx responses carry only `error`; 5xx responses add the underlying `message`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream(_) | AppError::MalformedResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the failure is attributable to the caller
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to the JSON body returned to callers
    pub fn to_error_response(&self) -> ErrorResponse {
        if self.is_client_error() {
            ErrorResponse {
                error: self.to_string(),
                message: None,
            }
        } else {
            ErrorResponse {
                error: INTERNAL_SERVER_ERROR.to_string(),
                message: Some(self.to_string()),
            }
        }
    }
}

impl From<ResponseShapeError> for AppError {
    fn from(err: ResponseShapeError) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        } else {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add upstream error context
    fn upstream_context(self, message: &str) -> AppResult<T>;

    /// Add malformed-response error context
    fn malformed_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn upstream_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Upstream(format!("{}: {}", message, e)))
    }

    fn malformed_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::MalformedResponse(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation("test".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("test".to_string()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::PayloadTooLarge(1024).status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(AppError::Upstream("test".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::MalformedResponse("test".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_body_has_no_message() {
        let body = AppError::Validation("No code provided.".to_string()).to_error_response();

        assert_eq!(body.error, "No code provided.");
        assert!(body.message.is_none());
    }

    #[test]
    fn test_server_error_body_carries_message() {
        let body = AppError::Upstream("connection refused".to_string()).to_error_response();

        assert_eq!(body.error, INTERNAL_SERVER_ERROR);
        assert_eq!(
            body.message.as_deref(),
            Some("Error calling chat completion API: connection refused")
        );
    }

    #[test]
    fn test_shape_error_conversion() {
        let err: AppError = ResponseShapeError::NoChoices.into();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
