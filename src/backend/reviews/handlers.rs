/**
 * Review Handlers
 *
 * - `GET  /api/restaurantes/{id}/avaliacoes` - reviews of a restaurant
 * - `POST /api/restaurantes/{id}/avaliacoes` - add a review as the current user
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::restaurants::handlers::find_or_404;
use crate::backend::reviews::types::{review_rules, NewReview, Review, ReviewInput};
use crate::backend::server::state::AppState;
use crate::backend::validation::JsonPayload;

/// List the reviews of a restaurant
///
/// # Errors
///
/// * `404` - If the restaurant does not exist
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, BackendError> {
    let restaurant = find_or_404(state.restaurants.as_ref(), &id).await?;
    let reviews = state.reviews.reviews_for_restaurant(restaurant.id).await?;
    Ok(Json(reviews))
}

/// Add a review. The author is the authenticated user; any `user_id` in the
/// body is ignored.
///
/// # Errors
///
/// * `404` - If the restaurant does not exist
/// * `422` - If the payload fails validation
pub async fn store(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Review>), BackendError> {
    let restaurant = find_or_404(state.restaurants.as_ref(), &id).await?;
    let input: ReviewInput = review_rules().validate_into(&payload).await?;

    let review = state
        .reviews
        .insert_review(NewReview::new(restaurant.id, user.user_id, input))
        .await?;

    tracing::info!(
        "Review {} added to restaurant {} by user {}",
        review.id,
        restaurant.id,
        user.user_id
    );
    Ok((StatusCode::CREATED, Json(review)))
}
