use axum::{extract::{State, Path}, response::IntoResponse, Json};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

use crate::api::dtos::{
    requests::{CreateEventRequest, CreatorAuthRequest, UpdateEventRequest},
    responses::{EventCreatedResponse, EventDetailResponse},
};
use crate::api::extractors::lang::RequestLang;
use crate::api::handlers::{ensure_creator, load_event, location::build_candidate};
use crate::domain::models::event::{Event, NewEventParams};
use crate::domain::services::{
    identity::hash_optional,
    notification::send_event_created,
    tally::{summarize_attendance, tally_candidates, tally_restaurants},
    validation::{
        parse_date, parse_time, validate_description, validate_email, validate_name,
        validate_optional_coordinates, validate_password, validate_time_window, validate_title,
        ValidationError,
    },
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let creator_name = validate_name(&payload.creator_name).map_err(|e| e.localized(lang))?;
    let creator_email = validate_email(payload.creator_email.as_deref()).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.creator_password.as_deref()).map_err(|e| e.localized(lang))?;
    let title = validate_title(&payload.title).map_err(|e| e.localized(lang))?;
    let description = validate_description(&payload.description).map_err(|e| e.localized(lang))?;
    let date = parse_date(&payload.date).map_err(|e| e.localized(lang))?;
    let start_time = parse_time(&payload.start_time).map_err(|e| e.localized(lang))?;
    let end_time = parse_time(&payload.end_time).map_err(|e| e.localized(lang))?;
    validate_time_window(start_time, end_time).map_err(|e| e.localized(lang))?;
    let coordinates = validate_optional_coordinates(payload.latitude, payload.longitude)
        .map_err(|e| e.localized(lang))?;

    let event = Event::new(NewEventParams {
        creator_name,
        creator_email,
        creator_password_hash: hash_optional(password)?,
        date,
        start_time,
        end_time,
        title,
        description,
        auto_reset: payload.auto_reset,
        latitude: coordinates.map(|c| c.0),
        longitude: coordinates.map(|c| c.1),
    });

    // Resolve every initial candidate before anything is written.
    let mut candidates = Vec::with_capacity(payload.locations.len());
    let mut seen = HashSet::new();
    for req in &payload.locations {
        let candidate = build_candidate(&state, &event.id, req, lang).await?;
        if !seen.insert(candidate.name.clone()) {
            return Err(ValidationError::CandidateDuplicate.localized(lang));
        }
        candidates.push(candidate);
    }

    let created_event = state.event_repo.create(&event).await?;
    let mut locations = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        locations.push(state.location_repo.create_candidate(candidate).await?);
    }
    info!("Created event {} with {} location candidates", created_event.id, locations.len());

    let share_url = state.config.share_url(&created_event.token);

    if let Some(email_service) = state.email_service.clone()
        && created_event.creator_email.is_some() {
        let templates = state.templates.clone();
        let tz = state.config.timezone;
        let event = created_event.clone();
        let url = share_url.clone();
        tokio::spawn(async move {
            let event_id = event.id.clone();
            if let Err(e) = send_event_created(email_service, templates, event, tz, url).await {
                error!("Failed to send share link for event {}: {:?}", event_id, e);
            }
        });
    }

    Ok(Json(EventCreatedResponse {
        token: created_event.token.clone(),
        event: created_event,
        share_url,
        locations,
    }))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;

    let participants = state.participant_repo.list_by_event(&event.id).await?;
    let summary = summarize_attendance(&participants);

    let candidates = state.location_repo.list_candidates(&event.id).await?;
    let location_votes = state.location_repo.list_votes_by_event(&event.id).await?;

    let restaurants = state.restaurant_repo.list_voted_in_event(&event.id).await?;
    let restaurant_votes = state.restaurant_repo.list_votes_by_event(&event.id).await?;

    Ok(Json(EventDetailResponse {
        event,
        participants,
        summary,
        locations: tally_candidates(candidates, &location_votes),
        restaurant_votes: tally_restaurants(restaurants, &restaurant_votes),
    }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = load_event(&state, &token, lang).await?;
    ensure_creator(&event, payload.creator_password.as_deref(), lang)?;

    if let Some(title) = payload.title.as_deref() {
        event.title = validate_title(title).map_err(|e| e.localized(lang))?;
    }
    if let Some(description) = payload.description.as_deref() {
        event.description = validate_description(description).map_err(|e| e.localized(lang))?;
    }
    if let Some(date) = payload.date.as_deref() {
        event.date = parse_date(date).map_err(|e| e.localized(lang))?;
    }
    if let Some(start) = payload.start_time.as_deref() {
        event.start_time = parse_time(start).map_err(|e| e.localized(lang))?;
    }
    if let Some(end) = payload.end_time.as_deref() {
        event.end_time = parse_time(end).map_err(|e| e.localized(lang))?;
    }
    validate_time_window(event.start_time, event.end_time).map_err(|e| e.localized(lang))?;

    if let Some(auto_reset) = payload.auto_reset {
        event.auto_reset = auto_reset;
    }
    if payload.latitude.is_some() || payload.longitude.is_some() {
        let latitude = payload.latitude.unwrap_or(event.latitude);
        let longitude = payload.longitude.unwrap_or(event.longitude);
        let coordinates = validate_optional_coordinates(latitude, longitude)
            .map_err(|e| e.localized(lang))?;
        event.latitude = coordinates.map(|c| c.0);
        event.longitude = coordinates.map(|c| c.1);
    }
    event.updated_at = Utc::now();

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
    payload: Option<Json<CreatorAuthRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.unwrap_or_default();
    let event = load_event(&state, &token, lang).await?;
    ensure_creator(&event, payload.creator_password.as_deref(), lang)?;

    state.event_repo.delete(&event.id).await?;
    info!("Deleted event {}", event.id);
    Ok(Json(serde_json::json!({ "deleted": event.id })))
}
