use crate::domain::{models::external::GeocodeResult, ports::GeocodingService};
use crate::error::AppError;
use super::{check_response, decode_error, http_client};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

const SERVICE: &str = "Geocoding service";

pub struct NominatimGeocodingService {
    client: Client,
    base_url: String,
}

impl NominatimGeocodingService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(Place),
    Missing { error: String },
}

impl Place {
    fn into_result(self) -> Option<GeocodeResult> {
        Some(GeocodeResult {
            display_name: self.display_name,
            latitude: self.lat.parse().ok()?,
            longitude: self.lon.parse().ok()?,
        })
    }
}

impl ReverseResponse {
    fn into_result(self) -> Option<GeocodeResult> {
        match self {
            ReverseResponse::Found(place) => place.into_result(),
            ReverseResponse::Missing { error } => {
                info!("Reverse geocoding found nothing: {}", error);
                None
            }
        }
    }
}

#[async_trait]
impl GeocodingService for NominatimGeocodingService {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, AppError> {
        let url = format!("{}/search", self.base_url);
        let res = self.client.get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "5")])
            .send()
            .await;

        let places: Vec<Place> = check_response(SERVICE, res).await?
            .json()
            .await
            .map_err(|e| decode_error(SERVICE, e))?;

        let results: Vec<GeocodeResult> = places.into_iter().filter_map(Place::into_result).collect();
        info!("Geocoding returned {} results", results.len());
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodeResult>, AppError> {
        let url = format!("{}/reverse", self.base_url);
        let res = self.client.get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .send()
            .await;

        let body: ReverseResponse = check_response(SERVICE, res).await?
            .json()
            .await
            .map_err(|e| decode_error(SERVICE, e))?;

        Ok(body.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_parses_string_coordinates() {
        let places: Vec<Place> = serde_json::from_value(json!([
            { "display_name": "Tokyo Station, Chiyoda, Tokyo", "lat": "35.6812", "lon": "139.7671", "place_id": 1 },
            { "display_name": "Broken", "lat": "north", "lon": "139.0" }
        ])).unwrap();

        let results: Vec<GeocodeResult> = places.into_iter().filter_map(Place::into_result).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Tokyo Station, Chiyoda, Tokyo");
        assert_eq!(results[0].latitude, 35.6812);
        assert_eq!(results[0].longitude, 139.7671);
    }

    #[test]
    fn reverse_hit_and_miss() {
        let found: ReverseResponse = serde_json::from_value(json!({
            "display_name": "Marunouchi, Chiyoda, Tokyo", "lat": "35.68", "lon": "139.76"
        })).unwrap();
        assert_eq!(found.into_result().unwrap().display_name, "Marunouchi, Chiyoda, Tokyo");

        let missing: ReverseResponse = serde_json::from_value(json!({ "error": "Unable to geocode" })).unwrap();
        assert!(matches!(missing, ReverseResponse::Missing { .. }));
        assert!(missing.into_result().is_none());
    }
}
