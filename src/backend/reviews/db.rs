/**
 * Review Database Operations
 */

use async_trait::async_trait;
use uuid::Uuid;

use crate::backend::reviews::types::{NewReview, Review};
use crate::backend::store::postgres::map_db_error;
use crate::backend::store::{PgStore, ReviewStore, StoreError};

const REVIEW_COLUMNS: &str = "id, restaurant_id, user_id, rating, comment, created_at, updated_at";

/// Resolve a violated foreign key on `reviews` to the missing resource
fn referenced_resource(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("reviews_user_id_fkey") => "User",
        _ => "Restaurant",
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn reviews_for_restaurant(&self, restaurant_id: Uuid) -> Result<Vec<Review>, StoreError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE restaurant_id = $1 ORDER BY created_at, id"
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool())
        .await?;

        Ok(reviews)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let review = Review::from_new(review);

        sqlx::query(
            r#"
            INSERT INTO reviews (id, restaurant_id, user_id, rating, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id)
        .bind(review.restaurant_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| map_db_error(e, None, referenced_resource))?;

        Ok(review)
    }
}
