//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! failures from the credential store, token verification, and input validation.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and middleware can
//! return it directly; every variant renders as a JSON body of the form
//! `{"error": "...", "message": "..."}` with the same text under both keys.
//! Server-side variants are logged in full and reported to the client with a generic message.
//!
//! `ConfigError` is separate: it only occurs while reading configuration at startup and
//! is never rendered as an HTTP response.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Represents all possible errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Malformed or invalid request (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// The requested resource does not exist or is not visible to the caller (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// The request collides with existing state, e.g. a taken username (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    /// Failure reported by the database driver (HTTP 500).
    #[error("Database Error: {0}")]
    DatabaseError(String),
    /// Input failed validation after deserialization (HTTP 422).
    #[error("Validation Error: {0}")]
    ValidationError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
        };
        // Browser clients read `message`; `error` is kept for API consumers.
        HttpResponse::build(self.status_code()).json(json!({ "error": message, "message": message }))
    }
}

/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
/// Unique violations are mapped by the store that knows which constraint was hit.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> AppError {
        AppError::InternalServerError(format!("Background task failed: {}", error))
    }
}

/// Errors raised while loading configuration. Any of these aborts startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("JWT_SECRET must be at least {minimum} bytes for HS512, got {actual}")]
    WeakSecret { actual: usize, minimum: usize },
}
