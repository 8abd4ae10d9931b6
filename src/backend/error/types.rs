/**
 * Backend Error Types
 *
 * The tagged failure taxonomy of the API. Handlers and services return
 * `Result<T, BackendError>` and propagate with `?`; the conversion module
 * renders the variant as a response.
 *
 * # Error Categories
 *
 * - Client input problems: `Validation`, `BadRequest`
 * - Authentication problems: `InvalidCredentials` (login), `Unauthenticated` (guard)
 * - Missing resources: `NotFound`
 * - Everything else: `Internal`, whose message is logged and never sent to clients
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::backend::validation::ValidationErrors;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields failed validation
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Login failed. Deliberately identical for unknown email and wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, unknown, expired or revoked bearer token
    #[error("Unauthenticated")]
    Unauthenticated,

    /// A referenced resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable resource name, e.g. "Restaurant"
        resource: &'static str,
    },

    /// The request body could not be read as a JSON object
    #[error("Bad request: {message}")]
    BadRequest {
        /// Description of what was wrong with the body
        message: String,
    },

    /// Storage or other unexpected failure
    #[error("Internal error: {message}")]
    Internal {
        /// Server-side detail, only ever logged
        message: String,
    },
}

impl BackendError {
    /// Create a not-found error for the named resource
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Create a bad-request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label placed in the `error` field of the envelope
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation error",
            Self::InvalidCredentials => "Unauthorized",
            Self::Unauthenticated => "Unauthenticated",
            Self::NotFound { .. } => "Not found",
            Self::BadRequest { .. } => "Bad request",
            Self::Internal { .. } => "Server error",
        }
    }

    /// Whether the failure is the server's fault
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field } => {
                Self::field(field, format!("The {field} has already been taken."))
            }
            StoreError::MissingReference { resource } => Self::not_found(resource),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("background task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::field("email", "bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(BackendError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::not_found("Restaurant").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::bad_request("nope").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BackendError::internal("db down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unique_violation_becomes_field_error() {
        let error: BackendError = StoreError::UniqueViolation { field: "email" }.into();
        assert_matches!(&error, BackendError::Validation(errors) => {
            assert_eq!(
                errors.messages("email"),
                Some(&["The email has already been taken.".to_string()][..])
            );
        });
    }

    #[test]
    fn test_missing_reference_becomes_not_found() {
        let error: BackendError = StoreError::MissingReference { resource: "Restaurant" }.into();
        assert_matches!(error, BackendError::NotFound { resource: "Restaurant" });
    }

    #[test]
    fn test_database_error_becomes_internal() {
        let error: BackendError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(error.is_internal());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(BackendError::not_found("Restaurant").to_string(), "Restaurant not found");
    }
}
