/**
 * In-Memory Store
 *
 * Implements every store trait over plain maps behind one `RwLock`. Each
 * operation takes the lock once, so check-then-write sequences (email
 * uniqueness, review parent checks) are atomic just like their database
 * constraints.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::sessions::TokenRecord;
use crate::backend::auth::users::{NewUser, User};
use crate::backend::restaurants::types::{Restaurant, RestaurantInput};
use crate::backend::reviews::types::{NewReview, Review};
use crate::backend::store::{
    CredentialStore, RestaurantStore, ReviewStore, StoreError, TokenStore,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// normalized email -> user id
    emails: HashMap<String, Uuid>,
    /// token digest -> record
    tokens: HashMap<String, TokenRecord>,
    /// insertion order
    restaurants: Vec<Restaurant>,
    /// insertion order
    reviews: Vec<Review>,
}

/// In-memory implementation of the store traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.emails.contains_key(email))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.emails.contains_key(&user.email) {
            return Err(StoreError::UniqueViolation { field: "email" });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.emails.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert_token(&self, token: TokenRecord) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        // expired records can never authenticate again
        tables.tokens.retain(|_, record| record.is_live(now));
        tables.tokens.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.tables.read().await.tokens.get(token_hash).cloned())
    }

    async fn mark_revoked(&self, token_hash: &str) -> Result<(), StoreError> {
        self.tables.write().await.tokens.remove(token_hash);
        Ok(())
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.tables.read().await.restaurants.clone())
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .restaurants
            .iter()
            .find(|restaurant| restaurant.id == id)
            .cloned())
    }

    async fn insert_restaurant(&self, input: RestaurantInput) -> Result<Restaurant, StoreError> {
        let restaurant = Restaurant::from_input(input);
        self.tables.write().await.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn update_restaurant(
        &self,
        id: Uuid,
        input: RestaurantInput,
    ) -> Result<Option<Restaurant>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .restaurants
            .iter_mut()
            .find(|restaurant| restaurant.id == id)
            .map(|restaurant| {
                restaurant.apply(input);
                restaurant.clone()
            }))
    }

    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.restaurants.len();
        tables.restaurants.retain(|restaurant| restaurant.id != id);
        if tables.restaurants.len() == before {
            return Ok(false);
        }
        tables.reviews.retain(|review| review.restaurant_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn reviews_for_restaurant(&self, restaurant_id: Uuid) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .reviews
            .iter()
            .filter(|review| review.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.restaurants.iter().any(|r| r.id == review.restaurant_id) {
            return Err(StoreError::MissingReference { resource: "Restaurant" });
        }
        if !tables.users.contains_key(&review.user_id) {
            return Err(StoreError::MissingReference { resource: "User" });
        }

        let review = Review::from_new(review);
        tables.reviews.push(review.clone());
        Ok(review)
    }
}
