//! Backend Error Module
//!
//! Every failure a handler can produce is a [`BackendError`]. The error is
//! turned into an HTTP response in exactly one place (`conversion`), so all
//! routes share the same JSON envelopes:
//!
//! | Variant              | Status | Body                                   |
//! |----------------------|--------|----------------------------------------|
//! | `Validation`         | 422    | `{error, message: {field: [..]}, code}` |
//! | `InvalidCredentials` | 401    | `{error, message}`                     |
//! | `Unauthenticated`    | 401    | `{error, message}`                     |
//! | `NotFound`           | 404    | `{error, message, code}`               |
//! | `BadRequest`         | 400    | `{error, message, code}`               |
//! | `Internal`           | 500    | `{error, message, code}`               |
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
