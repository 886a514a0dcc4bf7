//! Typed error handling for the biztime service
//!
//! The HTTP contract knows exactly three failure shapes:
//!
//! - [`ApiError::Validation`]: a malformed payload (missing required field) → 400
//! - [`ApiError::NotFound`]: no row matched the requested key → 404
//! - [`ApiError::Store`]: any datastore failure, surfaced uncaught → 500
//!
//! Every error body on the wire is `{"error": <message>}`. Store failures are
//! logged with their full cause but the response body stays generic.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for request handling
#[derive(Debug)]
pub enum ApiError {
    /// A required field was missing or empty in the request payload
    Validation(String),

    /// No row matched the requested key
    NotFound {
        /// Display name of the resource, e.g. "Company" or "Invoice"
        resource: &'static str,
    },

    /// Underlying datastore failure (constraint violation, connectivity
    /// loss, malformed query). Never classified further; never retried.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::NotFound { resource } => write!(f, "{} not found", resource),
            ApiError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response body shared by every failing route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Shorthand for a 404 on the given resource
    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error (used in logs, not on the wire)
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }

    /// The message exposed on the wire.
    ///
    /// Store failures collapse to a generic message; the cause is logged
    /// server-side instead.
    fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(cause) = &self {
            tracing::error!(code = self.error_code(), %cause, "request failed at the store layer");
        }
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors surfaced by a storage backend
#[derive(Debug)]
pub enum StoreError {
    /// Failed to reach the backend
    Connection { message: String },

    /// Query execution failed
    Query { message: String },

    /// A referential-integrity or uniqueness constraint was violated
    Integrity { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection { message } => {
                write!(f, "failed to connect to the store: {}", message)
            }
            StoreError::Query { message } => write!(f, "query error: {}", message),
            StoreError::Integrity { message } => {
                write!(f, "integrity constraint violated: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation() || db.is_unique_violation() =>
            {
                StoreError::Integrity {
                    message: db.to_string(),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connection {
                    message: err.to_string(),
                }
            }
            _ => StoreError::Query {
                message: err.to_string(),
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status_code() {
        let err = ApiError::Validation("Name is required.".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::not_found("Company");
        assert_eq!(err.to_string(), "Company not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::not_found("Invoice");
        assert_eq!(err.to_string(), "Invoice not found");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Integrity {
            message: "comp_code references a missing company".to_string(),
        };
        let api_err: ApiError = store_err.into();
        assert_eq!(api_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_store_error_never_leaks_cause() {
        let err = ApiError::Store(StoreError::Query {
            message: "syntax error in SELECT near FROM".to_string(),
        });
        assert_eq!(err.public_message(), "internal server error");
    }

    #[test]
    fn test_validation_message_on_the_wire() {
        let err = ApiError::Validation("Name is required.".to_string());
        assert_eq!(err.public_message(), "Name is required.");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Connection {
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
