/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password return the same 401 body
 * - Only the digest of the issued token is stored
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::TokenResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::validation::JsonPayload;

/// Login handler
///
/// # Returns
///
/// `200 OK` with `{"token":"<opaque token>"}`
///
/// # Errors
///
/// * `401 Unauthorized` - If the email is unknown or the password is wrong
/// * `422 Unprocessable Entity` - If email or password is missing or malformed
///
/// # Example Response
///
/// ```json
/// { "token": "3f9c0d...e41a" }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<TokenResponse>, BackendError> {
    let token = auth.login(&payload).await?;
    Ok(Json(TokenResponse { token }))
}
