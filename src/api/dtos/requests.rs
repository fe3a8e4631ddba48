use serde::{Deserialize, Deserializer};

use crate::domain::models::participant::ParticipantStatus;

#[derive(Deserialize)]
pub struct AddCandidateRequest {
    pub name: Option<String>,
    pub restaurant_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub creator_name: String,
    pub creator_email: Option<String>,
    pub creator_password: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub auto_reset: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub locations: Vec<AddCandidateRequest>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub creator_password: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub auto_reset: Option<bool>,
    /// Absent leaves the stored value, `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub longitude: Option<Option<f64>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of creator-only deletes. It may be omitted when the event has no password.
#[derive(Deserialize, Default)]
pub struct CreatorAuthRequest {
    pub creator_password: Option<String>,
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub name: String,
    pub password: Option<String>,
    pub status: ParticipantStatus,
    pub comment: Option<String>,
}

/// The (name, password) pair used to vote or to take something back.
#[derive(Deserialize)]
pub struct IdentityRequest {
    pub name: String,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertRestaurantRequest {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
}

#[derive(Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

#[derive(Deserialize)]
pub struct CoordinatesQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct PlacesQuery {
    pub query: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<u32>,
}
