//! API error types with IntoResponse
//!
//! Errors become short plain-text responses with the matching status code.
//! Store failures are logged and reported generically.

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;

/// Body returned for every 5xx
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404); the id is logged, not echoed
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Verb not served on this path (405)
    MethodNotAllowed { method: Method, allow: &'static str },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => {
                tracing::debug!(error = %e, "rejected request");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(%id, "{} not found", resource);
                (StatusCode::NOT_FOUND, format!("{} not found", resource)).into_response()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE).into_response()
            }
            Self::MethodNotAllowed { method, allow } => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow)],
                format!("Method {} Not Allowed", method),
            )
                .into_response(),
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
