/**
 * Review Types
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::validation::{Rule, Validator};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// Review struct representing a row of the `reviews` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    #[serde(rename = "restaurante_id")]
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "avaliacao")]
    pub rating: i32,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated review payload. The author is never read from the body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewInput {
    #[serde(rename = "avaliacao")]
    pub rating: i32,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
}

/// A review about to be inserted
#[derive(Debug, Clone)]
pub struct NewReview {
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

impl NewReview {
    pub fn new(restaurant_id: Uuid, user_id: Uuid, input: ReviewInput) -> Self {
        Self {
            restaurant_id,
            user_id,
            rating: input.rating,
            comment: input.comment,
        }
    }
}

impl Review {
    /// Build a fresh record
    pub fn from_new(review: NewReview) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            restaurant_id: review.restaurant_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Rules for a review payload
pub fn review_rules() -> Validator {
    Validator::new()
        .field(
            "avaliacao",
            [
                Rule::Required,
                Rule::Integer,
                Rule::Min(f64::from(MIN_RATING)),
                Rule::Max(f64::from(MAX_RATING)),
            ],
        )
        .field("comentario", [Rule::Nullable, Rule::String])
}
