//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.
//!
//! Two error families propagate unchanged from the data-access layer to the
//! HTTP boundary: validation errors (malformed or missing input, detected
//! before any store call) and store errors (anything SeaORM reports). A
//! missing row is not an error at the repository layer; it surfaces as an
//! `Option::None` sentinel and is translated to `NotFound` by callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-checkable classification of validation failures.
///
/// The legacy API raised bare message strings; the kind makes the failure
/// checkable without string matching while the human message stays on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationKind {
    MissingName,
    MissingEmail,
    MissingContactFields,
    MissingGroupName,
    InvalidContactId,
    InvalidGroupId,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::MissingName => "MISSING_NAME",
            ValidationKind::MissingEmail => "MISSING_EMAIL",
            ValidationKind::MissingContactFields => "MISSING_CONTACT_FIELDS",
            ValidationKind::MissingGroupName => "MISSING_GROUP_NAME",
            ValidationKind::InvalidContactId => "INVALID_CONTACT_ID",
            ValidationKind::InvalidGroupId => "INVALID_GROUP_ID",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource lookup came back empty. Carries the route-specific message
    /// because the legacy wire contract words not-found per endpoint.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or missing input, detected before any store call.
    #[error("{message}")]
    Validation {
        kind: ValidationKind,
        message: String,
    },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body, matching the legacy wire format.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    status: u16,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation { kind, .. } => kind.as_str(),
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    ///
    /// Validation failures answer 402: the legacy API used that code and
    /// clients depend on it.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::PAYMENT_REQUIRED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Validation kind, when this is a validation error.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            AppError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.user_message(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(kind: ValidationKind, message: impl Into<String>) -> Self {
        AppError::Validation {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(format!("{} not found", entity.into()))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
