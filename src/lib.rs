//! Restaurant review API
//!
//! A small JSON API for registering users, logging in with opaque bearer
//! tokens, managing restaurants and submitting reviews scoped to a
//! restaurant.
//!
//! # Module Structure
//!
//! - **`shared`** - configuration types
//! - **`backend`** - the Axum server
//!   - `auth` - password hashing, bearer tokens, registration and login
//!   - `validation` - declarative request validation
//!   - `middleware` - bearer token guard for protected routes
//!   - `error` - the single mapping from failures to JSON envelopes
//!   - `store` - storage traits with PostgreSQL and in-memory backends
//!   - `restaurants`, `reviews` - resource handlers
//!   - `routes`, `server` - router assembly and startup
//!
//! # Usage
//!
//! ```rust,no_run
//! use restaurant_api::backend::server::init::create_app;
//! use restaurant_api::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! - Passwords are stored as bcrypt digests only
//! - Bearer tokens are random 256-bit values; only their SHA-256 digest is stored
//! - Login failures never reveal whether the email exists
//! - Internal error details are logged, never returned to clients

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
