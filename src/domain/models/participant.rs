use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Credentialed;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Going,
    NotGoing,
    Maybe,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Going => "going",
            ParticipantStatus::NotGoing => "not_going",
            ParticipantStatus::Maybe => "maybe",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub status: String, // going, not_going, maybe
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        event_id: String,
        name: String,
        password_hash: Option<String>,
        status: ParticipantStatus,
        comment: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            password_hash,
            status: status.as_str().to_string(),
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Credentialed for Participant {
    fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub going: usize,
    pub not_going: usize,
    pub maybe: usize,
}
