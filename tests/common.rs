use lunch_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::{
        factory::load_templates,
        repositories::{
            sqlite_event_repo::SqliteEventRepo,
            sqlite_participant_repo::SqliteParticipantRepo,
            sqlite_location_repo::SqliteLocationRepo,
            sqlite_restaurant_repo::SqliteRestaurantRepo,
        },
    },
    domain::models::external::{GeocodeResult, PlaceResult, WeatherForecast},
    domain::ports::{EmailService, GeocodingService, PlacesService, WeatherService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use chrono::NaiveDate;
use tower::ServiceExt;
use serde_json::Value;

pub const CRON_SECRET: &str = "test-cron-secret";

#[allow(dead_code)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
}

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            attachment_name: attachment_name.map(str::to_string),
        });
        Ok(())
    }
}

pub struct MockGeocodingService;

#[async_trait]
impl GeocodingService for MockGeocodingService {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, AppError> {
        if query == "upstream-down" {
            return Err(AppError::Upstream("Geocoding service connection error".into()));
        }
        Ok(vec![GeocodeResult {
            display_name: format!("{}, Chiyoda, Tokyo", query),
            latitude: 35.6812,
            longitude: 139.7671,
        }])
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodeResult>, AppError> {
        if latitude == 0.0 && longitude == 0.0 {
            return Ok(None);
        }
        Ok(Some(GeocodeResult {
            display_name: "Marunouchi, Chiyoda, Tokyo".to_string(),
            latitude,
            longitude,
        }))
    }
}

pub struct MockWeatherService;

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn daily_forecast(&self, _latitude: f64, _longitude: f64, date: NaiveDate) -> Result<Option<WeatherForecast>, AppError> {
        Ok(Some(WeatherForecast {
            date,
            weather_code: 61,
            description: "Rain".to_string(),
            temperature_max: Some(18.5),
            temperature_min: Some(11.0),
            precipitation_probability: Some(70.0),
        }))
    }
}

/// Remembers the last radius it was asked for.
#[derive(Default)]
pub struct MockPlacesService {
    pub last_radius: Mutex<Option<u32>>,
}

#[async_trait]
impl PlacesService for MockPlacesService {
    async fn search(&self, query: &str, _near: Option<(f64, f64)>, radius_m: u32) -> Result<Vec<PlaceResult>, AppError> {
        *self.last_radius.lock().unwrap() = Some(radius_m);
        Ok(vec![PlaceResult {
            place_id: "place-ramen-1".to_string(),
            name: format!("{} House", query),
            address: "1-1 Marunouchi".to_string(),
            latitude: 35.68,
            longitude: 139.76,
            rating: Some(4.2),
            user_ratings_total: Some(321),
        }])
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub email_service: Arc<MockEmailService>,
    pub places_service: Arc<MockPlacesService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            frontend_url: "http://lunch.test".to_string(),
            timezone: chrono_tz::Asia::Tokyo,
            cron_secret: Some(CRON_SECRET.to_string()),
            reset_interval_secs: 0,
            geocoding_url: "http://localhost".to_string(),
            weather_url: "http://localhost".to_string(),
            places_url: "http://localhost".to_string(),
            places_api_key: None,
            mail_service_url: Some("http://localhost".to_string()),
            mail_service_token: Some("token".to_string()),
            cors_origins: "*".to_string(),
        };

        let email_service = Arc::new(MockEmailService::default());
        let places_service = Arc::new(MockPlacesService::default());

        let state = Arc::new(AppState {
            config,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            participant_repo: Arc::new(SqliteParticipantRepo::new(pool.clone())),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            restaurant_repo: Arc::new(SqliteRestaurantRepo::new(pool.clone())),
            geocoding_service: Arc::new(MockGeocodingService),
            weather_service: Arc::new(MockWeatherService),
            places_service: places_service.clone(),
            email_service: Some(email_service.clone()),
            templates: Arc::new(load_templates()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            email_service,
            places_service,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a JSON request (or an empty body when `body` is `None`) and decodes the reply.
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.send(request).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Creates an event and returns the creation response.
    pub async fn create_event(&self, payload: Value) -> Value {
        let (status, body) = self.call("POST", "/api/v1/events", Some(payload)).await;
        assert_eq!(status, StatusCode::OK, "event creation failed: {}", body);
        body
    }

    pub async fn create_lunch(&self) -> String {
        let body = self.create_event(lunch_payload()).await;
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn lunch_payload() -> Value {
    serde_json::json!({
        "creator_name": "Aki",
        "date": "2025-04-01",
        "start_time": "12:00",
        "end_time": "13:00",
        "title": "Team lunch",
        "description": "Near the station"
    })
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
