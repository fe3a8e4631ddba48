use axum::{extract::{State, Query}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dtos::requests::{CoordinatesQuery, GeocodeQuery, PlacesQuery, WeatherQuery};
use crate::api::extractors::lang::RequestLang;
use crate::domain::services::{
    reset::today_in,
    validation::{parse_date, validate_coordinates, validate_optional_coordinates, validate_query},
};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_RADIUS_M: u32 = 1000;
const MAX_RADIUS_M: u32 = 50_000;

pub async fn geocode(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Query(params): Query<GeocodeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = validate_query(&params.q).map_err(|e| e.localized(lang))?;
    let results = state.geocoding_service.search(&query).await?;
    Ok(Json(results))
}

pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Query(params): Query<CoordinatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (lat, lon) = validate_coordinates(params.lat, params.lon).map_err(|e| e.localized(lang))?;
    let result = state.geocoding_service.reverse(lat, lon).await?
        .ok_or_else(|| AppError::NotFound(lang.pick("No address found for these coordinates", "この地点の住所が見つかりません").into()))?;
    Ok(Json(result))
}

/// Defaults to today in the configured timezone.
pub async fn weather(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Query(params): Query<WeatherQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (lat, lon) = validate_coordinates(params.lat, params.lon).map_err(|e| e.localized(lang))?;
    let date = match params.date.as_deref() {
        Some(raw) => parse_date(raw).map_err(|e| e.localized(lang))?,
        None => today_in(state.config.timezone, Utc::now()),
    };

    let forecast = state.weather_service.daily_forecast(lat, lon, date).await?
        .ok_or_else(|| AppError::NotFound(lang.pick("No forecast available for this date", "この日の天気予報はありません").into()))?;
    Ok(Json(forecast))
}

pub async fn search_places(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Query(params): Query<PlacesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = validate_query(&params.query).map_err(|e| e.localized(lang))?;
    let near = validate_optional_coordinates(params.lat, params.lon).map_err(|e| e.localized(lang))?;
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_M).clamp(1, MAX_RADIUS_M);

    let places = state.places_service.search(&query, near, radius).await?;
    Ok(Json(places))
}
