//! Restaurants Module
//!
//! Restaurant records, their validation rules, the PostgreSQL queries behind
//! [`RestaurantStore`](crate::backend::store::RestaurantStore) and the CRUD
//! handlers mounted under `/api/restaurantes`.

/// HTTP handlers
pub mod handlers;

/// Record, payload and rules
pub mod types;

/// PostgreSQL queries
pub mod db;

pub use types::{Restaurant, RestaurantInput};
