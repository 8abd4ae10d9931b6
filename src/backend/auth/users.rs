/**
 * User Model and Database Operations
 *
 * This module holds the user record, the rules for normalizing emails and
 * the PostgreSQL implementation of the credential store.
 */

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::store::postgres::map_db_error;
use crate::backend::store::{CredentialStore, PgStore, StoreError};
use crate::backend::validation::UniqueCheck;

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Normalized email address (unique)
    pub email: String,
    /// bcrypt digest of the password. Never serialized.
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// A user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Normalize an email for storage and lookup (trimmed, lower-cased)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `unique` validation rule backed by the credential store
pub struct UniqueEmail(pub Arc<dyn CredentialStore>);

#[async_trait]
impl UniqueCheck for UniqueEmail {
    async fn is_taken(&self, value: &str) -> Result<bool, StoreError> {
        self.0.exists_by_email(&normalize_email(value)).await
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(self.pool())
            .await?;

        Ok(exists)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_db_error(e, Some("email"), |_| "User"))
    }
}
