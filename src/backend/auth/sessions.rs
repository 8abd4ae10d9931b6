/**
 * Bearer Token Management
 *
 * This module issues, verifies and revokes opaque bearer tokens.
 *
 * A token is 32 random bytes from the operating system RNG, hex encoded.
 * The plaintext is handed to the client once; the server keeps only its
 * SHA-256 digest, so a leaked `personal_access_tokens` table cannot be
 * replayed. Verification hashes the presented token and looks the digest up,
 * which keeps lookup timing independent of the secret itself.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::postgres::map_db_error;
use crate::backend::store::{PgStore, StoreError, TokenStore};

/// Number of random bytes in a token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Stored form of an issued token
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TokenRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// SHA-256 hex digest of the plaintext token
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    /// `None` for tokens that never expire
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked: bool,
}

impl TokenRecord {
    /// Whether the token may still authenticate requests at `now`
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// Generate a fresh plaintext token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest under which a token is stored
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Issues and checks bearer tokens against a token store
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<dyn TokenStore>,
    ttl: Option<chrono::Duration>,
}

impl TokenIssuer {
    /// Create an issuer. `ttl` of `None` issues tokens that never expire.
    pub fn new(store: Arc<dyn TokenStore>, ttl: Option<Duration>) -> Self {
        Self {
            store,
            ttl: ttl.and_then(|ttl| chrono::Duration::from_std(ttl).ok()),
        }
    }

    /// Mint a token bound to `user_id` and return its plaintext.
    ///
    /// The plaintext is not recoverable afterwards.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, BackendError> {
        let token = generate_token();
        let now = Utc::now();

        self.store
            .insert_token(TokenRecord {
                id: Uuid::new_v4(),
                user_id,
                token_hash: hash_token(&token),
                created_at: now,
                expires_at: self.ttl.map(|ttl| now + ttl),
                revoked: false,
            })
            .await?;

        tracing::debug!("Issued token for user {}", user_id);
        Ok(token)
    }

    /// Resolve a presented token to the user it is bound to
    pub async fn verify(&self, token: &str) -> Result<Option<Uuid>, BackendError> {
        self.verify_hash(&hash_token(token)).await
    }

    /// Resolve a token digest to its user, if the token is live
    pub async fn verify_hash(&self, token_hash: &str) -> Result<Option<Uuid>, BackendError> {
        let record = self.store.find_by_hash(token_hash).await?;

        Ok(record
            .filter(|record| record.is_live(Utc::now()))
            .map(|record| record.user_id))
    }

    /// Revoke a token by its plaintext. Idempotent.
    pub async fn revoke(&self, token: &str) -> Result<(), BackendError> {
        self.revoke_hash(&hash_token(token)).await
    }

    /// Revoke a token by its digest. Idempotent.
    pub async fn revoke_hash(&self, token_hash: &str) -> Result<(), BackendError> {
        self.store.mark_revoked(token_hash).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for PgStore {
    async fn insert_token(&self, token: TokenRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO personal_access_tokens (id, user_id, token_hash, created_at, expires_at, revoked)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.revoked)
        .execute(self.pool())
        .await
        .map_err(|e| map_db_error(e, None, |_| "User"))?;

        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<TokenRecord>, StoreError> {
        let record = sqlx::query_as::<_, TokenRecord>(
            r#"
            SELECT id, user_id, token_hash, created_at, expires_at, revoked
            FROM personal_access_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }

    async fn mark_revoked(&self, token_hash: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE personal_access_tokens SET revoked = TRUE WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
