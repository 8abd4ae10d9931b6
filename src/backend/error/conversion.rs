/**
 * Error Conversion
 *
 * Renders a `BackendError` as an HTTP response. This is the only place in the
 * crate that decides status codes and envelope shapes for failures.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Validation error",
 *   "message": { "email": ["The email has already been taken."] },
 *   "code": 422
 * }
 * ```
 *
 * Internal errors are logged with their detail and rendered with a fixed
 * generic message.
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use crate::backend::error::types::BackendError;

/// Message returned to clients for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

impl BackendError {
    /// Build the JSON envelope for this error
    pub fn to_body(&self) -> Value {
        let code = self.status_code().as_u16();
        match self {
            Self::Validation(errors) => json!({
                "error": self.label(),
                "message": errors,
                "code": code,
            }),
            Self::InvalidCredentials => json!({
                "error": self.label(),
                "message": "Unauthorized",
            }),
            Self::Unauthenticated => json!({
                "error": self.label(),
                "message": "Unauthenticated.",
            }),
            Self::NotFound { .. } | Self::BadRequest { .. } => json!({
                "error": self.label(),
                "message": self.to_string_for_client(),
                "code": code,
            }),
            Self::Internal { .. } => json!({
                "error": self.label(),
                "message": INTERNAL_ERROR_MESSAGE,
                "code": code,
            }),
        }
    }

    fn to_string_for_client(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        if let Self::Internal { message } = &self {
            tracing::error!("Internal error: {}", message);
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}
