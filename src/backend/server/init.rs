/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * state creation, storage loading and route configuration.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_state;
use crate::backend::store::StoreError;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Load Storage**: PostgreSQL if configured, otherwise in-memory
/// 2. **Create State**: Auth service, token issuer and resource stores
/// 3. **Create Router**: Configures all routes and middleware
///
/// # Errors
///
/// Fails if a configured database cannot be reached or migrated.
pub async fn create_app(config: &AppConfig) -> Result<Router, StoreError> {
    tracing::info!("Initializing restaurant API server");

    let app_state = load_state(config).await?;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
