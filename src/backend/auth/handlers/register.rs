/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/register.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password (including email uniqueness)
 * 2. Hash the password using bcrypt
 * 3. Insert the user; the unique constraint settles concurrent requests
 *
 * No token is issued: clients log in afterwards.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::validation::JsonPayload;

/// Register handler
///
/// # Arguments
///
/// * `State(auth)` - Authentication service
/// * `JsonPayload(payload)` - Raw request body
///
/// # Returns
///
/// `201 Created` with `{"message":"User created successfully"}`
///
/// # Errors
///
/// * `422 Unprocessable Entity` - If validation fails or the email is taken
/// * `400 Bad Request` - If the body is not a JSON object
/// * `500 Internal Server Error` - If hashing or storage fails
///
/// # Example Request
///
/// ```http
/// POST /api/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Maria Eduarda",
///   "email": "maria@example.com",
///   "password": "password123"
/// }
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    auth.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}
