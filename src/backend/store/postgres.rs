/**
 * PostgreSQL Store
 *
 * Connection pool wrapper shared by every PostgreSQL-backed store trait.
 * The queries themselves live with their domain modules.
 */

use sqlx::PgPool;

use crate::backend::store::StoreError;

/// PostgreSQL implementation of the store traits
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run pending migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Database connection pool created successfully");

        tracing::info!("Running database migrations...");
        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        tracing::info!("Database migrations completed successfully");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a database error, translating constraint violations into their
/// domain meaning.
///
/// `unique` names the payload field guarded by a unique constraint on the
/// table being written, `reference` resolves a foreign key constraint name
/// to the resource it points at.
pub(crate) fn map_db_error(
    err: sqlx::Error,
    unique: Option<&'static str>,
    reference: fn(Option<&str>) -> &'static str,
) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            if let Some(field) = unique {
                return StoreError::UniqueViolation { field };
            }
        }
        if db.is_foreign_key_violation() {
            return StoreError::MissingReference {
                resource: reference(db.constraint()),
            };
        }
    }
    StoreError::Database(err)
}
