//! # Error Handling
//!
//! This module defines custom error types for the application and handles
//! converting them into HTTP responses.
//!
//! Every error leaves the server as JSON of the form `{ "message": "..." }`.
//! Internal details (driver errors, upstream failures) are logged and replaced
//! by a generic message before they reach the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned when a guarded form arrives without a reCAPTCHA token.
pub const RECAPTCHA_MISSING_MESSAGE: &str = "Vui lòng xác minh reCAPTCHA!";
/// Message returned when the verification endpoint rejects the token.
pub const RECAPTCHA_REJECTED_MESSAGE: &str = "Xác minh reCAPTCHA thất bại!";
/// Message returned when the verification endpoint could not be reached.
pub const RECAPTCHA_UNAVAILABLE_MESSAGE: &str = "Lỗi server khi xác minh reCAPTCHA!";

/// Application-wide error type
///
/// Each variant corresponds to a different category of error. The
/// `#[from]` attributes let `?` convert library errors automatically.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors (reading or writing the session record)
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The request carried no reCAPTCHA token
    #[error("{}", RECAPTCHA_MISSING_MESSAGE)]
    RecaptchaMissing,

    /// The verification endpoint answered `success: false`
    #[error("{}", RECAPTCHA_REJECTED_MESSAGE)]
    RecaptchaRejected,

    /// The verification endpoint could not be reached or answered garbage
    #[error("reCAPTCHA verification error: {0}")]
    RecaptchaUnavailable(#[from] crate::recaptcha::RecaptchaError),

    /// Authentication errors (401)
    ///
    /// Used when no user is stored in the session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server errors (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convert AppError into an HTTP response
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted into proper HTTP error responses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::RecaptchaUnavailable(e) => {
                tracing::error!("reCAPTCHA verification error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RECAPTCHA_UNAVAILABLE_MESSAGE.to_string(),
                )
            }
            AppError::RecaptchaMissing | AppError::RecaptchaRejected => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
