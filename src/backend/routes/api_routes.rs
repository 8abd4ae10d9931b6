/**
 * API Route Handlers
 *
 * This module defines the API endpoints.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/register` - User registration
 * - `POST /api/login` - User login
 *
 * ## Protected (bearer token)
 * - `GET /api/user` - Current user info
 * - `POST /api/logout` - Revoke the current token
 * - `GET|POST /api/restaurantes`
 * - `GET|PUT|DELETE /api/restaurantes/{id}`
 * - `GET|POST /api/restaurantes/{id}/avaliacoes`
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::restaurants::handlers as restaurants;
use crate::backend::reviews::handlers as reviews;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected routes get the auth middleware as a `route_layer`, so it only
/// runs for requests that matched one of them. Unknown paths fall through to
/// the router's 404 fallback instead of a 401.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let public: Router<AppState> = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    let protected: Router<AppState> = Router::new()
        .route("/api/user", get(get_me))
        .route("/api/logout", post(logout))
        .route(
            "/api/restaurantes",
            get(restaurants::index).post(restaurants::store),
        )
        .route(
            "/api/restaurantes/{id}",
            get(restaurants::show)
                .put(restaurants::update)
                .delete(restaurants::destroy),
        )
        .route(
            "/api/restaurantes/{id}/avaliacoes",
            get(reviews::index).post(reviews::store),
        )
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router.merge(public).merge(protected)
}
