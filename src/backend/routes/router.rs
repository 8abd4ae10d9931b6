/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * 1. API routes (public, then protected behind the auth middleware)
 * 2. Fallback handler (404 envelope)
 * 3. Request tracing
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing services and stores
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("Route") });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
