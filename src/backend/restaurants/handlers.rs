/**
 * Restaurant Handlers
 *
 * CRUD handlers for `/api/restaurantes`. All routes sit behind the auth
 * middleware.
 *
 * # Endpoints
 *
 * - `GET    /api/restaurantes`      - list, oldest first
 * - `POST   /api/restaurantes`      - create (201)
 * - `GET    /api/restaurantes/{id}` - show
 * - `PUT    /api/restaurantes/{id}` - replace attributes
 * - `DELETE /api/restaurantes/{id}` - delete with its reviews (204)
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::restaurants::types::{restaurant_rules, Restaurant, RestaurantInput};
use crate::backend::store::RestaurantStore;
use crate::backend::validation::JsonPayload;

/// Parse a path id. An id that is not a UUID names nothing, so it is a 404.
pub fn parse_id(raw: &str, resource: &'static str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!("Malformed {} id in path: {}", resource, raw);
        BackendError::not_found(resource)
    })
}

/// Load a restaurant or fail with 404
pub async fn find_or_404(
    restaurants: &dyn RestaurantStore,
    raw_id: &str,
) -> Result<Restaurant, BackendError> {
    let id = parse_id(raw_id, "Restaurant")?;
    restaurants
        .find_restaurant(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Restaurant"))
}

/// List restaurants
pub async fn index(
    State(restaurants): State<Arc<dyn RestaurantStore>>,
) -> Result<Json<Vec<Restaurant>>, BackendError> {
    let list = restaurants.list_restaurants().await?;
    tracing::debug!("Listing {} restaurants", list.len());
    Ok(Json(list))
}

/// Create a restaurant
///
/// # Errors
///
/// * `422` - If the payload fails validation
pub async fn store(
    State(restaurants): State<Arc<dyn RestaurantStore>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Restaurant>), BackendError> {
    let input: RestaurantInput = restaurant_rules().validate_into(&payload).await?;
    let restaurant = restaurants.insert_restaurant(input).await?;

    tracing::info!("Restaurant created: {} ({})", restaurant.id, restaurant.name);
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// Show one restaurant
pub async fn show(
    State(restaurants): State<Arc<dyn RestaurantStore>>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, BackendError> {
    Ok(Json(find_or_404(restaurants.as_ref(), &id).await?))
}

/// Replace a restaurant's attributes
///
/// The restaurant is looked up before the payload is validated, so an
/// unknown id is a 404 even when the body is invalid.
///
/// # Errors
///
/// * `404` - If the restaurant does not exist
/// * `422` - If the payload fails validation
pub async fn update(
    State(restaurants): State<Arc<dyn RestaurantStore>>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Restaurant>, BackendError> {
    let existing = find_or_404(restaurants.as_ref(), &id).await?;
    let input: RestaurantInput = restaurant_rules().validate_into(&payload).await?;

    // deleted between lookup and update
    let restaurant = restaurants
        .update_restaurant(existing.id, input)
        .await?
        .ok_or_else(|| BackendError::not_found("Restaurant"))?;

    tracing::info!("Restaurant updated: {}", restaurant.id);
    Ok(Json(restaurant))
}

/// Delete a restaurant and its reviews
pub async fn destroy(
    State(restaurants): State<Arc<dyn RestaurantStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let id = parse_id(&id, "Restaurant")?;
    if !restaurants.delete_restaurant(id).await? {
        return Err(BackendError::not_found("Restaurant"));
    }

    tracing::info!("Restaurant deleted: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
