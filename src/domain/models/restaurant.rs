use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Credentialed;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
    pub created_at: DateTime<Utc>,
}

pub struct NewRestaurantParams {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
}

impl Restaurant {
    pub fn new(params: NewRestaurantParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            address: params.address,
            latitude: params.latitude,
            longitude: params.longitude,
            place_id: params.place_id,
            rating: params.rating,
            user_ratings_total: params.user_ratings_total,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RestaurantVote {
    pub id: String,
    pub event_id: String,
    pub restaurant_id: String,
    pub voter_name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RestaurantVote {
    pub fn new(event_id: String, restaurant_id: String, voter_name: String, password_hash: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            restaurant_id,
            voter_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Credentialed for RestaurantVote {
    fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct RestaurantTally {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub vote_count: usize,
    pub voters: Vec<String>,
}
