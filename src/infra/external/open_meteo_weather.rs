use crate::domain::{models::external::WeatherForecast, ports::WeatherService};
use crate::error::AppError;
use super::{check_response, decode_error, http_client};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

const SERVICE: &str = "Weather service";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

pub struct OpenMeteoWeatherService {
    client: Client,
    base_url: String,
}

impl OpenMeteoWeatherService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    daily: Option<Daily>,
}

#[derive(Deserialize)]
struct Daily {
    time: Vec<NaiveDate>,
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

impl Daily {
    fn forecast_for(&self, date: NaiveDate) -> Option<WeatherForecast> {
        let idx = self.time.iter().position(|d| *d == date)?;
        let code = self.weather_code.get(idx).copied().flatten()?;
        Some(WeatherForecast {
            date,
            weather_code: code,
            description: describe_weather_code(code).to_string(),
            temperature_max: self.temperature_2m_max.get(idx).copied().flatten(),
            temperature_min: self.temperature_2m_min.get(idx).copied().flatten(),
            precipitation_probability: self.precipitation_probability_max.get(idx).copied().flatten(),
        })
    }
}

/// WMO weather interpretation codes.
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 => "Snow",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[async_trait]
impl WeatherService for OpenMeteoWeatherService {
    #[instrument(skip(self))]
    async fn daily_forecast(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Result<Option<WeatherForecast>, AppError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();
        let res = self.client.get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
            ])
            .send()
            .await;

        let body: ForecastResponse = check_response(SERVICE, res).await?
            .json()
            .await
            .map_err(|e| decode_error(SERVICE, e))?;

        Ok(body.daily.and_then(|d| d.forecast_for(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(63), "Rain");
        assert_eq!(describe_weather_code(81), "Rain showers");
        assert_eq!(describe_weather_code(1000), "Unknown");
    }

    #[test]
    fn picks_requested_day() {
        let body: ForecastResponse = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2025-04-01", "2025-04-02"],
                "weather_code": [3, 61],
                "temperature_2m_max": [18.2, 15.0],
                "temperature_2m_min": [9.1, null],
                "precipitation_probability_max": [10, 80]
            }
        })).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let forecast = body.daily.unwrap().forecast_for(date).unwrap();
        assert_eq!(forecast.weather_code, 61);
        assert_eq!(forecast.description, "Rain");
        assert_eq!(forecast.temperature_min, None);
        assert_eq!(forecast.precipitation_probability, Some(80.0));
    }
}
