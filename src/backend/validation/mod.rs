//! Request Validation Module
//!
//! Declarative validation of JSON request bodies. Handlers describe each
//! field with a list of [`Rule`]s and get back either the normalized payload
//! or a [`BackendError::Validation`](crate::backend::error::BackendError)
//! carrying every field error.
//!
//! # Example
//!
//! ```rust,no_run
//! use restaurant_api::backend::validation::{Rule, Validator};
//!
//! let rules = Validator::new()
//!     .field("email", [Rule::Required, Rule::String, Rule::Email])
//!     .field("password", [Rule::Required, Rule::String, Rule::Verbatim, Rule::Min(8.0)]);
//! ```
//!
//! # Module Structure
//!
//! ```text
//! validation/
//! ├── mod.rs       - Module exports and documentation
//! ├── rules.rs     - Rule definitions and primitive checks
//! ├── validator.rs - Field table evaluation
//! ├── errors.rs    - Field -> messages collection
//! └── payload.rs   - Raw JSON body extractor
//! ```

pub mod errors;
pub mod payload;
pub mod rules;
pub mod validator;

pub use errors::ValidationErrors;
pub use payload::JsonPayload;
pub use rules::{Rule, UniqueCheck};
pub use validator::Validator;
