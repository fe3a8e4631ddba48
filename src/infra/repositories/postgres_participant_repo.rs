use crate::domain::{models::participant::Participant, ports::ParticipantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepo {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            "INSERT INTO participants (id, event_id, name, password_hash, status, comment, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
            .bind(&participant.id)
            .bind(&participant.event_id)
            .bind(&participant.name)
            .bind(&participant.password_hash)
            .bind(&participant.status)
            .bind(&participant.comment)
            .bind(participant.created_at)
            .bind(participant.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_name(&self, event_id: &str, name: &str) -> Result<Vec<Participant>, AppError> {
        sqlx::query_as::<_, Participant>(
            "SELECT * FROM participants WHERE event_id = $1 AND name = $2 ORDER BY created_at",
        )
            .bind(event_id)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Participant>, AppError> {
        sqlx::query_as::<_, Participant>(
            "SELECT * FROM participants WHERE event_id = $1 ORDER BY created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, participant: &Participant) -> Result<Participant, AppError> {
        sqlx::query_as::<_, Participant>(
            "UPDATE participants SET status=$1, comment=$2, updated_at=$3 WHERE id=$4 RETURNING *"
        )
            .bind(&participant.status)
            .bind(&participant.comment)
            .bind(participant.updated_at)
            .bind(&participant.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Participant not found".into()));
        }
        Ok(())
    }
}
