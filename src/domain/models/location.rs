use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Credentialed;

pub const CANDIDATE_FREE: &str = "free";
pub const CANDIDATE_RESTAURANT: &str = "restaurant";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct LocationCandidate {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub candidate_type: String, // free, restaurant
    pub restaurant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LocationCandidate {
    pub fn free(event_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            candidate_type: CANDIDATE_FREE.to_string(),
            restaurant_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn restaurant(event_id: String, name: String, restaurant_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            candidate_type: CANDIDATE_RESTAURANT.to_string(),
            restaurant_id: Some(restaurant_id),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct LocationVote {
    pub id: String,
    pub event_id: String,
    pub candidate_id: String,
    pub voter_name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LocationVote {
    pub fn new(event_id: String, candidate_id: String, voter_name: String, password_hash: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            candidate_id,
            voter_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Credentialed for LocationVote {
    fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CandidateWithVotes {
    #[serde(flatten)]
    pub candidate: LocationCandidate,
    pub vote_count: usize,
    pub voters: Vec<String>,
}
