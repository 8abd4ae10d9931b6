/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds only cheap-to-clone handles:
 * - the authentication service (credential store, hasher, token issuer)
 * - the token issuer used by the auth middleware
 * - the restaurant and review stores
 *
 * Every store handle is an `Arc<dyn Trait>`, so the same router runs
 * against PostgreSQL in production and the in-memory store in tests.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * async fn handler(State(auth): State<AuthService>) { /* ... */ }
 * ```
 */

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;

use crate::backend::auth::password::{BcryptHasher, PasswordHasher};
use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::store::{
    CredentialStore, MemoryStore, RestaurantStore, ReviewStore, TokenStore,
};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and logout
    pub auth: AuthService,

    /// Token verification for the auth middleware
    pub tokens: TokenIssuer,

    /// Restaurant persistence
    pub restaurants: Arc<dyn RestaurantStore>,

    /// Review persistence
    pub reviews: Arc<dyn ReviewStore>,
}

impl AppState {
    /// Build the state over one store implementing every storage trait
    ///
    /// # Arguments
    ///
    /// * `store` - Backend for users, tokens, restaurants and reviews
    /// * `hasher` - Password hasher used at registration and login
    /// * `token_ttl` - Lifetime of issued tokens, `None` for no expiry
    pub fn with_store<S>(
        store: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        token_ttl: Option<Duration>,
    ) -> Self
    where
        S: CredentialStore + TokenStore + RestaurantStore + ReviewStore + 'static,
    {
        let users: Arc<dyn CredentialStore> = store.clone();
        let token_store: Arc<dyn TokenStore> = store.clone();
        let tokens = TokenIssuer::new(token_store, token_ttl);

        Self {
            auth: AuthService::new(users, hasher, tokens.clone()),
            tokens,
            restaurants: store.clone(),
            reviews: store,
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory(bcrypt_cost: u32, token_ttl: Option<Duration>) -> Self {
        Self::with_store(
            Arc::new(MemoryStore::new()),
            Arc::new(BcryptHasher::new(bcrypt_cost)),
            token_ttl,
        )
    }
}

/// Implement FromRef for AuthService
///
/// This allows the auth handlers to extract the service directly using
/// `State(AuthService)`.
impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

/// Implement FromRef for the restaurant store
impl FromRef<AppState> for Arc<dyn RestaurantStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.restaurants.clone()
    }
}
