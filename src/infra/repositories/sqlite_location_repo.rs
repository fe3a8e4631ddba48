use crate::domain::{
    models::location::{LocationCandidate, LocationVote},
    ports::LocationRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn create_candidate(&self, candidate: &LocationCandidate) -> Result<LocationCandidate, AppError> {
        sqlx::query_as::<_, LocationCandidate>(
            "INSERT INTO location_candidates (id, event_id, name, candidate_type, restaurant_id, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&candidate.id)
            .bind(&candidate.event_id)
            .bind(&candidate.name)
            .bind(&candidate.candidate_type)
            .bind(&candidate.restaurant_id)
            .bind(candidate.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_candidate(&self, event_id: &str, id: &str) -> Result<Option<LocationCandidate>, AppError> {
        sqlx::query_as::<_, LocationCandidate>(
            "SELECT * FROM location_candidates WHERE event_id = ? AND id = ?",
        )
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_candidate_by_name(&self, event_id: &str, name: &str) -> Result<Option<LocationCandidate>, AppError> {
        sqlx::query_as::<_, LocationCandidate>(
            "SELECT * FROM location_candidates WHERE event_id = ? AND name = ? LIMIT 1",
        )
            .bind(event_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_candidates(&self, event_id: &str) -> Result<Vec<LocationCandidate>, AppError> {
        sqlx::query_as::<_, LocationCandidate>(
            "SELECT * FROM location_candidates WHERE event_id = ? ORDER BY created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_candidate(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM location_candidates WHERE event_id = ? AND id = ?")
            .bind(event_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location candidate not found".into()));
        }
        Ok(())
    }

    async fn create_vote(&self, vote: &LocationVote) -> Result<LocationVote, AppError> {
        sqlx::query_as::<_, LocationVote>(
            "INSERT INTO location_votes (id, event_id, candidate_id, voter_name, password_hash, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&vote.id)
            .bind(&vote.event_id)
            .bind(&vote.candidate_id)
            .bind(&vote.voter_name)
            .bind(&vote.password_hash)
            .bind(vote.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_votes_by_voter(&self, candidate_id: &str, voter_name: &str) -> Result<Vec<LocationVote>, AppError> {
        sqlx::query_as::<_, LocationVote>(
            "SELECT * FROM location_votes WHERE candidate_id = ? AND voter_name = ? ORDER BY created_at",
        )
            .bind(candidate_id)
            .bind(voter_name)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_votes_by_event(&self, event_id: &str) -> Result<Vec<LocationVote>, AppError> {
        sqlx::query_as::<_, LocationVote>(
            "SELECT * FROM location_votes WHERE event_id = ? ORDER BY created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_vote(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM location_votes WHERE id = ?")
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
