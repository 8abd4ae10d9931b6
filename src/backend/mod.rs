//! Backend Module
//!
//! This module contains all server-side code for the restaurant review API:
//! an Axum HTTP server with bearer token authentication, request validation
//! and PostgreSQL or in-memory persistence.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, storage selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, bearer tokens, registration and login
//! - **`middleware`** - Bearer token guard for protected routes
//! - **`validation`** - Declarative request validation
//! - **`restaurants`** - Restaurant CRUD
//! - **`reviews`** - Reviews scoped to a restaurant
//! - **`store`** - Storage traits and their backends
//! - **`error`** - Backend error types and their JSON envelopes
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── validation/     - Request validation
//! ├── restaurants/    - Restaurant resource
//! ├── reviews/        - Review resource
//! ├── store/          - Persistence
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<T, BackendError>` and propagate with `?`. The one
//! `IntoResponse` impl on `BackendError` decides status codes and bodies.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Request validation
pub mod validation;

/// Restaurant resource
pub mod restaurants;

/// Review resource
pub mod reviews;

/// Storage traits and backends
pub mod store;

pub use error::BackendError;
pub use server::{create_app, AppState};
