//! Unified error handling for the gateway.
//!
//! Every failure ends up as an HTTP status plus a `{"error": "..."}` body.
//! Upstream messages are surfaced verbatim; only `Internal` is hidden.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    /// Upstream rejected the presented credentials
    #[error("{0}")]
    Authentication(String),

    // Request errors
    /// Body could not be decoded or failed field checks
    #[error("{0}")]
    BadRequest(String),

    /// Upstream rejected the payload (e.g. duplicate email)
    #[error("{0}")]
    Validation(String),

    // Upstream
    /// Transport or protocol failure talking to an upstream service
    #[error("{0}")]
    Upstream(String),

    // Route outcomes
    #[error("{0}")]
    RegistrationFailed(String),

    #[error("{0}")]
    LoginFailed(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) | AppError::LoginFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::RegistrationFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream error: {}", msg);
                msg.clone()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        AppError::Authentication(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Registration failure carrying the underlying message (500).
    pub fn registration_failed(source: AppError) -> Self {
        AppError::RegistrationFailed(source.to_string())
    }

    /// Login failure carrying the underlying message (401).
    pub fn login_failed(source: AppError) -> Self {
        AppError::LoginFailed(source.to_string())
    }
}
