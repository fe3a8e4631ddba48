use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

const CLEAR_ANSWERS: [&str; 3] = [
    "DELETE FROM location_votes WHERE event_id = ?",
    "DELETE FROM restaurant_votes WHERE event_id = ?",
    "DELETE FROM participants WHERE event_id = ?",
];

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, token, creator_name, creator_email, creator_password_hash, date, start_time, end_time, title, description, auto_reset, latitude, longitude, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&event.id)
            .bind(&event.token)
            .bind(&event.creator_name)
            .bind(&event.creator_email)
            .bind(&event.creator_password_hash)
            .bind(event.date)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.auto_reset)
            .bind(event.latitude)
            .bind(event.longitude)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET date=?, start_time=?, end_time=?, title=?, description=?, auto_reset=?, latitude=?, longitude=?, updated_at=? WHERE id=? RETURNING *"
        )
            .bind(event.date)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.auto_reset)
            .bind(event.latitude)
            .bind(event.longitude)
            .bind(event.updated_at)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }

    async fn list_due_for_reset(&self, today: NaiveDate) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE auto_reset = 1 AND date < ? ORDER BY created_at")
            .bind(today)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn reset_for_day(&self, event_id: &str, today: NaiveDate) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Rescheduled or already-reset events drop out here.
        let moved = sqlx::query("UPDATE events SET date = ?, updated_at = ? WHERE id = ? AND auto_reset = 1 AND date < ?")
            .bind(today)
            .bind(Utc::now())
            .bind(event_id)
            .bind(today)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if moved.rows_affected() != 1 {
            tx.rollback().await.map_err(AppError::Database)?;
            return Ok(false);
        }

        for statement in CLEAR_ANSWERS {
            sqlx::query(statement)
                .bind(event_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(true)
    }
}
