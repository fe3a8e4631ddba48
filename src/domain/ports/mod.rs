use crate::domain::models::{
    event::Event, participant::Participant,
    location::{LocationCandidate, LocationVote},
    restaurant::{Restaurant, RestaurantVote},
    external::{GeocodeResult, PlaceResult, WeatherForecast},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Auto-reset events whose date lies before `today`.
    async fn list_due_for_reset(&self, today: NaiveDate) -> Result<Vec<Event>, AppError>;
    /// Clears participants and votes and moves the event to `today`, atomically.
    /// Returns `false` without touching anything when the event is no longer due.
    async fn reset_for_day(&self, event_id: &str, today: NaiveDate) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn find_by_name(&self, event_id: &str, name: &str) -> Result<Vec<Participant>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Participant>, AppError>;
    async fn update(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create_candidate(&self, candidate: &LocationCandidate) -> Result<LocationCandidate, AppError>;
    async fn find_candidate(&self, event_id: &str, id: &str) -> Result<Option<LocationCandidate>, AppError>;
    async fn find_candidate_by_name(&self, event_id: &str, name: &str) -> Result<Option<LocationCandidate>, AppError>;
    async fn list_candidates(&self, event_id: &str) -> Result<Vec<LocationCandidate>, AppError>;
    async fn delete_candidate(&self, event_id: &str, id: &str) -> Result<(), AppError>;

    async fn create_vote(&self, vote: &LocationVote) -> Result<LocationVote, AppError>;
    async fn find_votes_by_voter(&self, candidate_id: &str, voter_name: &str) -> Result<Vec<LocationVote>, AppError>;
    async fn list_votes_by_event(&self, event_id: &str) -> Result<Vec<LocationVote>, AppError>;
    async fn delete_vote(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Inserts, or refreshes the row sharing the same `place_id`.
    async fn upsert(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, AppError>;
    async fn list_voted_in_event(&self, event_id: &str) -> Result<Vec<Restaurant>, AppError>;

    async fn create_vote(&self, vote: &RestaurantVote) -> Result<RestaurantVote, AppError>;
    async fn find_votes_by_voter(&self, event_id: &str, restaurant_id: &str, voter_name: &str) -> Result<Vec<RestaurantVote>, AppError>;
    async fn list_votes_by_event(&self, event_id: &str) -> Result<Vec<RestaurantVote>, AppError>;
    async fn delete_vote(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GeocodingService: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, AppError>;
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodeResult>, AppError>;
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn daily_forecast(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Result<Option<WeatherForecast>, AppError>;
}

#[async_trait]
pub trait PlacesService: Send + Sync {
    async fn search(&self, query: &str, near: Option<(f64, f64)>, radius_m: u32) -> Result<Vec<PlaceResult>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}
