use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{EmailService, GeocodingService, PlacesService, WeatherService};
use crate::domain::services::notification::EVENT_CREATED_TEMPLATE;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::external::{
    google_places::GooglePlacesService, nominatim_geocoding::NominatimGeocodingService,
    open_meteo_weather::OpenMeteoWeatherService,
};
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo, postgres_participant_repo::PostgresParticipantRepo,
    postgres_location_repo::PostgresLocationRepo, postgres_restaurant_repo::PostgresRestaurantRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_participant_repo::SqliteParticipantRepo,
    sqlite_location_repo::SqliteLocationRepo, sqlite_restaurant_repo::SqliteRestaurantRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template(EVENT_CREATED_TEMPLATE, include_str!("../templates/event_created.html"))
        .expect("Failed to load event_created template");
    tera
}

struct Integrations {
    geocoding_service: Arc<dyn GeocodingService>,
    weather_service: Arc<dyn WeatherService>,
    places_service: Arc<dyn PlacesService>,
    email_service: Option<Arc<dyn EmailService>>,
}

fn build_integrations(config: &Config) -> Integrations {
    let email_service: Option<Arc<dyn EmailService>> = match (&config.mail_service_url, &config.mail_service_token) {
        (Some(url), Some(token)) => Some(Arc::new(HttpEmailService::new(url.clone(), token.clone()))),
        _ => {
            warn!("MAIL_SERVICE_URL/MAIL_SERVICE_TOKEN not set; organizer emails are disabled");
            None
        }
    };

    if config.places_api_key.is_none() {
        warn!("PLACES_API_KEY not set; restaurant search will answer 503");
    }

    Integrations {
        geocoding_service: Arc::new(NominatimGeocodingService::new(config.geocoding_url.clone())),
        weather_service: Arc::new(OpenMeteoWeatherService::new(config.weather_url.clone())),
        places_service: Arc::new(GooglePlacesService::new(config.places_url.clone(), config.places_api_key.clone())),
        email_service,
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let integrations = build_integrations(config);
    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            participant_repo: Arc::new(PostgresParticipantRepo::new(pool.clone())),
            location_repo: Arc::new(PostgresLocationRepo::new(pool.clone())),
            restaurant_repo: Arc::new(PostgresRestaurantRepo::new(pool)),
            geocoding_service: integrations.geocoding_service,
            weather_service: integrations.weather_service,
            places_service: integrations.places_service,
            email_service: integrations.email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            participant_repo: Arc::new(SqliteParticipantRepo::new(pool.clone())),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            restaurant_repo: Arc::new(SqliteRestaurantRepo::new(pool)),
            geocoding_service: integrations.geocoding_service,
            weather_service: integrations.weather_service,
            places_service: integrations.places_service,
            email_service: integrations.email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
