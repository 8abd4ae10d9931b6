/**
 * Restaurant Database Operations
 */

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::backend::restaurants::types::{Restaurant, RestaurantInput};
use crate::backend::store::{PgStore, RestaurantStore, StoreError};

const RESTAURANT_COLUMNS: &str =
    "id, name, address, city, postal_code, phone, email, cuisine, description, created_at, updated_at";

#[async_trait]
impl RestaurantStore for PgStore {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY created_at, id"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(restaurants)
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError> {
        let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(restaurant)
    }

    async fn insert_restaurant(&self, input: RestaurantInput) -> Result<Restaurant, StoreError> {
        let restaurant = Restaurant::from_input(input);

        sqlx::query(
            r#"
            INSERT INTO restaurants
                (id, name, address, city, postal_code, phone, email, cuisine, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.address)
        .bind(&restaurant.city)
        .bind(&restaurant.postal_code)
        .bind(&restaurant.phone)
        .bind(&restaurant.email)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.description)
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .execute(self.pool())
        .await?;

        Ok(restaurant)
    }

    async fn update_restaurant(
        &self,
        id: Uuid,
        input: RestaurantInput,
    ) -> Result<Option<Restaurant>, StoreError> {
        let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
            r#"
            UPDATE restaurants
            SET name = $2, address = $3, city = $4, postal_code = $5, phone = $6,
                email = $7, cuisine = $8, description = $9, updated_at = $10
            WHERE id = $1
            RETURNING {RESTAURANT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.postal_code)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.cuisine)
        .bind(&input.description)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await?;

        Ok(restaurant)
    }

    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, StoreError> {
        // reviews go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
