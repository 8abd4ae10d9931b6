//! Reviews Module
//!
//! Ratings (1 to 5) with an optional comment, attached to a restaurant and
//! authored by the authenticated user.

/// HTTP handlers
pub mod handlers;

/// Record, payload and rules
pub mod types;

/// PostgreSQL queries
pub mod db;

pub use types::{NewReview, Review, ReviewInput};
