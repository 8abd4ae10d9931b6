/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/user, which returns
 * information about the currently authenticated user without the password
 * digest.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::UserProfile;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Raised by the auth middleware before this runs
/// * `404 Not Found` - If the token outlived its user
pub async fn get_me(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let profile = auth.current_user(user.user_id).await?;
    Ok(Json(profile.into()))
}
