/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into the application state, choosing the
 * storage backend.
 *
 * # Storage selection
 *
 * - `DATABASE_URL` set: connect to PostgreSQL and run migrations. Any failure
 *   aborts startup, since serving without the configured database would
 *   silently lose data.
 * - `DATABASE_URL` unset: run on the in-memory store. Data lives only as
 *   long as the process.
 */

use std::sync::Arc;

use crate::backend::auth::password::BcryptHasher;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, StoreError};
use crate::shared::AppConfig;

/// Build the application state for `config`
///
/// # Errors
///
/// Returns `StoreError::Database` if the configured database cannot be
/// reached or migrated.
pub async fn load_state(config: &AppConfig) -> Result<AppState, StoreError> {
    let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));

    match &config.database_url {
        Some(database_url) => {
            let store = PgStore::connect(database_url).await.map_err(|e| {
                tracing::error!("Failed to initialize database: {}", e);
                e
            })?;
            Ok(AppState::with_store(Arc::new(store), hasher, config.token_ttl))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
            Ok(AppState::with_store(
                Arc::new(MemoryStore::new()),
                hasher,
                config.token_ttl,
            ))
        }
    }
}
