/**
 * Logout Handler
 *
 * POST /api/logout revokes the token that authenticated the request. Other
 * tokens of the same user stay valid.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Logout handler
pub async fn logout(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    auth.logout(user.user_id, &user.token_hash).await?;
    Ok(Json(MessageResponse::new("Logged out")))
}
