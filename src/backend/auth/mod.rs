//! Authentication Module
//!
//! This module handles user registration, credential checks and bearer token
//! management, plus the HTTP handlers for the authentication endpoints.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`password`** - bcrypt password hashing
//! - **`sessions`** - Opaque token issuance, verification and revocation
//! - **`service`** - Registration and login orchestration
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → validated → user created (no token)
//! 2. **Login**: email and password → credentials verified → opaque token returned
//! 3. **Authenticated request**: `Authorization: Bearer <token>` → digest looked up → user id
//! 4. **Logout**: the presenting token is revoked
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stored only as SHA-256 digests
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// Bearer token management
pub mod sessions;

/// Registration and login orchestration
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, register};
pub use password::{BcryptHasher, PasswordHasher};
pub use service::{AuthService, RegistrationStage};
pub use sessions::TokenIssuer;
pub use users::{User, UserProfile};
