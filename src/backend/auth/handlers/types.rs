/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. Request types are only ever built from a payload that already
 * passed validation.
 */

use serde::{Deserialize, Serialize};

/// Registration request
///
/// Contains the name, email and password for user registration.
/// Not `Debug`: it carries a plaintext password.
#[derive(Deserialize)]
pub struct RegisterInput {
    /// Display name
    pub name: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Plain message response, e.g. `{"message":"User created successfully"}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Token response
///
/// Returned by the login handler. The token is shown once and cannot be
/// recovered from the server afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    /// Opaque bearer token
    pub token: String,
}
