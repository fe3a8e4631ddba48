use crate::domain::{
    models::restaurant::{Restaurant, RestaurantVote},
    ports::RestaurantRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRestaurantRepo {
    pool: PgPool,
}

impl PostgresRestaurantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantRepository for PostgresRestaurantRepo {
    async fn upsert(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError> {
        sqlx::query_as::<_, Restaurant>(
            r#"
            INSERT INTO restaurants (id, name, address, latitude, longitude, place_id, rating, user_ratings_total, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (place_id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                rating = EXCLUDED.rating,
                user_ratings_total = EXCLUDED.user_ratings_total
            RETURNING *
            "#,
        )
            .bind(&restaurant.id)
            .bind(&restaurant.name)
            .bind(&restaurant.address)
            .bind(restaurant.latitude)
            .bind(restaurant.longitude)
            .bind(&restaurant.place_id)
            .bind(restaurant.rating)
            .bind(restaurant.user_ratings_total)
            .bind(restaurant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_voted_in_event(&self, event_id: &str) -> Result<Vec<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>(
            "SELECT * FROM restaurants WHERE id IN (SELECT restaurant_id FROM restaurant_votes WHERE event_id = $1) ORDER BY name",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_vote(&self, vote: &RestaurantVote) -> Result<RestaurantVote, AppError> {
        sqlx::query_as::<_, RestaurantVote>(
            "INSERT INTO restaurant_votes (id, event_id, restaurant_id, voter_name, password_hash, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
            .bind(&vote.id)
            .bind(&vote.event_id)
            .bind(&vote.restaurant_id)
            .bind(&vote.voter_name)
            .bind(&vote.password_hash)
            .bind(vote.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_votes_by_voter(&self, event_id: &str, restaurant_id: &str, voter_name: &str) -> Result<Vec<RestaurantVote>, AppError> {
        sqlx::query_as::<_, RestaurantVote>(
            "SELECT * FROM restaurant_votes WHERE event_id = $1 AND restaurant_id = $2 AND voter_name = $3 ORDER BY created_at",
        )
            .bind(event_id)
            .bind(restaurant_id)
            .bind(voter_name)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_votes_by_event(&self, event_id: &str) -> Result<Vec<RestaurantVote>, AppError> {
        sqlx::query_as::<_, RestaurantVote>(
            "SELECT * FROM restaurant_votes WHERE event_id = $1 ORDER BY created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_vote(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM restaurant_votes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vote not found".into()));
        }
        Ok(())
    }
}
