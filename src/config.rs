use std::env;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,
    pub timezone: Tz,
    pub cron_secret: Option<String>,
    pub reset_interval_secs: u64,
    pub geocoding_url: String,
    pub weather_url: String,
    pub places_url: String,
    pub places_api_key: Option<String>,
    pub mail_service_url: Option<String>,
    pub mail_service_token: Option<String>,
    pub cors_origins: String,
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            timezone: env::var("APP_TIMEZONE").unwrap_or_else(|_| "Asia/Tokyo".to_string()).parse().expect("APP_TIMEZONE must be an IANA timezone"),
            cron_secret: optional("CRON_SECRET"),
            reset_interval_secs: env::var("RESET_INTERVAL_SECS").unwrap_or_else(|_| "0".to_string()).parse().expect("RESET_INTERVAL_SECS must be a number"),
            geocoding_url: env::var("GEOCODING_URL").unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            weather_url: env::var("WEATHER_URL").unwrap_or_else(|_| "https://api.open-meteo.com".to_string()),
            places_url: env::var("PLACES_URL").unwrap_or_else(|_| "https://maps.googleapis.com".to_string()),
            places_api_key: optional("PLACES_API_KEY"),
            mail_service_url: optional("MAIL_SERVICE_URL"),
            mail_service_token: optional("MAIL_SERVICE_TOKEN"),
            cors_origins: env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        }
    }

    pub fn share_url(&self, token: &str) -> String {
        format!("{}/events/{}", self.frontend_url.trim_end_matches('/'), token)
    }
}
