//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer token authentication for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/user", get(get_me))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
