//! Storage Module
//!
//! The API talks to storage only through the traits in this module, one per
//! table family. Two backends implement every trait:
//!
//! - **`postgres`** - [`PgStore`], backed by a `sqlx` connection pool. The SQL
//!   for each trait lives next to its domain (`auth::users`, `auth::sessions`,
//!   `restaurants::db`, `reviews::db`).
//! - **`memory`** - [`MemoryStore`], a single `RwLock`-guarded set of maps used
//!   by tests and database-less development runs.
//!
//! # Invariants
//!
//! Both backends enforce email uniqueness atomically at insert time and
//! report a violation as [`StoreError::UniqueViolation`], so two concurrent
//! registrations for one address produce exactly one user. Deleting a
//! restaurant removes its reviews.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::sessions::TokenRecord;
use crate::backend::auth::users::{NewUser, User};
use crate::backend::restaurants::types::{Restaurant, RestaurantInput};
use crate::backend::reviews::types::{NewReview, Review};

/// PostgreSQL backend
pub mod postgres;

/// In-memory backend
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated on {field}")]
    UniqueViolation {
        /// Field carrying the constraint, as named in the request payload
        field: &'static str,
    },

    /// A row referenced by the write does not exist (anymore)
    #[error("referenced {resource} does not exist")]
    MissingReference {
        /// Resource that was referenced
        resource: &'static str,
    },

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence of user accounts
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look a user up by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look a user up by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Whether any user holds the normalized email
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a user. Fails with `UniqueViolation { field: "email" }` if the
    /// email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Persistence of bearer token records
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert_token(&self, token: TokenRecord) -> Result<(), StoreError>;

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<TokenRecord>, StoreError>;

    /// Revoke the token so it no longer authenticates. Unknown hashes are
    /// ignored.
    async fn mark_revoked(&self, token_hash: &str) -> Result<(), StoreError>;
}

/// Persistence of restaurants
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// All restaurants, oldest first
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError>;

    async fn insert_restaurant(&self, input: RestaurantInput) -> Result<Restaurant, StoreError>;

    /// Replace the attributes of a restaurant. `None` if it does not exist.
    async fn update_restaurant(
        &self,
        id: Uuid,
        input: RestaurantInput,
    ) -> Result<Option<Restaurant>, StoreError>;

    /// Delete a restaurant and its reviews. `false` if it did not exist.
    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence of reviews
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews of one restaurant, oldest first
    async fn reviews_for_restaurant(&self, restaurant_id: Uuid) -> Result<Vec<Review>, StoreError>;

    /// Insert a review. Fails with `MissingReference` if the restaurant or
    /// user is gone.
    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;
}
