//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Each handler is a thin shell over [`AuthService`](crate::backend::auth::AuthService).
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── me.rs        - Get current user handler
//! └── logout.rs    - Token revocation handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/register - User registration
//! - **`login`** - POST /api/login - Token issuance
//! - **`get_me`** - GET /api/user - Current user info
//! - **`logout`** - POST /api/logout - Revoke the current token

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Logout handler
pub mod logout;

pub use types::{MessageResponse, TokenResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
