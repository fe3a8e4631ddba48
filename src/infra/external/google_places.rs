use crate::domain::{models::external::PlaceResult, ports::PlacesService};
use crate::error::AppError;
use super::{check_response, decode_error, http_client};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, instrument};

const SERVICE: &str = "Places service";

pub struct GooglePlacesService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GooglePlacesService {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceEntry>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceEntry {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: String,
    geometry: Geometry,
    rating: Option<f64>,
    user_ratings_total: Option<i32>,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<PlaceEntry> for PlaceResult {
    fn from(entry: PlaceEntry) -> Self {
        PlaceResult {
            place_id: entry.place_id,
            name: entry.name,
            address: entry.formatted_address,
            latitude: entry.geometry.location.lat,
            longitude: entry.geometry.location.lng,
            rating: entry.rating,
            user_ratings_total: entry.user_ratings_total,
        }
    }
}

fn places_from(body: TextSearchResponse) -> Result<Vec<PlaceResult>, AppError> {
    match body.status.as_str() {
        "OK" | "ZERO_RESULTS" => {
            info!("Places search returned {} results", body.results.len());
            Ok(body.results.into_iter().map(PlaceResult::from).collect())
        }
        status => {
            let msg = format!("{} status {}: {}", SERVICE, status, body.error_message.unwrap_or_default());
            error!("{}", msg);
            Err(AppError::Upstream(msg))
        }
    }
}

#[async_trait]
impl PlacesService for GooglePlacesService {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, near: Option<(f64, f64)>, radius_m: u32) -> Result<Vec<PlaceResult>, AppError> {
        let api_key = self.api_key.as_deref()
            .ok_or_else(|| AppError::Unavailable("Places search is not configured".into()))?;

        let url = format!("{}/maps/api/place/textsearch/json", self.base_url);
        let mut params = vec![
            ("query", query.to_string()),
            ("type", "restaurant".to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some((lat, lon)) = near {
            params.push(("location", format!("{},{}", lat, lon)));
            params.push(("radius", radius_m.to_string()));
        }

        let res = self.client.get(&url).query(&params).send().await;
        let body: TextSearchResponse = check_response(SERVICE, res).await?
            .json()
            .await
            .map_err(|e| decode_error(SERVICE, e))?;

        places_from(body)
    }
}
