//! Error handling for the admissions backend
//!
//! This module defines the main error type used throughout the application
//! and the mapping of each failure onto an HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the admissions backend
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Image required")]
    MissingAttachment,

    #[error("Only images allowed, got {0}")]
    UnsupportedMedia(String),

    #[error("Image exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for admissions backend operations
pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::InvalidCredentials => "InvalidCredentials",
            PortalError::Unauthenticated => "Unauthenticated",
            PortalError::ConstraintViolation(_) => "ConstraintViolation",
            PortalError::NotFound(_) => "NotFound",
            PortalError::MissingAttachment => "MissingAttachment",
            PortalError::UnsupportedMedia(_) => "UnsupportedMedia",
            PortalError::PayloadTooLarge { .. } => "PayloadTooLarge",
            PortalError::InvalidInput(_) => "InvalidInput",
            PortalError::RateLimitExceeded => "RateLimitExceeded",
            PortalError::StorageFailure(_)
            | PortalError::Database(_)
            | PortalError::Migration(_)
            | PortalError::Io(_)
            | PortalError::Serialization(_) => "StorageFailure",
            PortalError::Token(_) => "TokenFailure",
            PortalError::Config(_) => "Config",
        }
    }

    /// HTTP status the error surfaces as
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::InvalidCredentials | PortalError::Unauthenticated => StatusCode::UNAUTHORIZED,
            PortalError::ConstraintViolation(_) => StatusCode::CONFLICT,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::MissingAttachment | PortalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PortalError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PortalError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PortalError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure was caused by the client rather than the server
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if the error is recoverable by simply retrying later
    pub fn is_recoverable(&self) -> bool {
        match self {
            PortalError::Database(_) => true,
            PortalError::Io(_) => true,
            PortalError::StorageFailure(_) => true,
            PortalError::RateLimitExceeded => true,
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PortalError::Database(_) => ErrorSeverity::Critical,
            PortalError::Migration(_) => ErrorSeverity::Critical,
            PortalError::Config(_) => ErrorSeverity::Critical,
            PortalError::InvalidCredentials => ErrorSeverity::Warning,
            PortalError::Unauthenticated => ErrorSeverity::Warning,
            PortalError::RateLimitExceeded => ErrorSeverity::Warning,
            PortalError::ConstraintViolation(_)
            | PortalError::NotFound(_)
            | PortalError::MissingAttachment
            | PortalError::UnsupportedMedia(_)
            | PortalError::PayloadTooLarge { .. }
            | PortalError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message that is safe to show to the caller
    fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "Request rejected");
        }

        let body = Json(ErrorBody {
            error: self.kind(),
            message: self.public_message(),
        });
        (status, body).into_response()
    }
}
