use std::sync::Arc;
use crate::domain::ports::{
    EventRepository, ParticipantRepository, LocationRepository, RestaurantRepository,
    GeocodingService, WeatherService, PlacesService, EmailService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub restaurant_repo: Arc<dyn RestaurantRepository>,
    pub geocoding_service: Arc<dyn GeocodingService>,
    pub weather_service: Arc<dyn WeatherService>,
    pub places_service: Arc<dyn PlacesService>,
    /// `None` when no mail service is configured.
    pub email_service: Option<Arc<dyn EmailService>>,
    pub templates: Arc<Tera>,
}
