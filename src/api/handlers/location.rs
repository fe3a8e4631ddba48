use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::{
    requests::{AddCandidateRequest, CreatorAuthRequest, IdentityRequest},
    responses::LocationVoteResponse,
};
use crate::api::extractors::lang::RequestLang;
use crate::api::handlers::{ensure_creator, load_event};
use crate::domain::models::location::{LocationCandidate, LocationVote};
use crate::domain::services::{
    i18n::Lang,
    identity::{hash_optional, resolve, IdentityError, Resolution},
    tally::tally_candidates,
    validation::{validate_candidate_name, validate_name, validate_password, ValidationError},
};
use crate::error::AppError;
use crate::state::AppState;

/// Turns a request into an unsaved candidate. A restaurant candidate takes its
/// name from the stored restaurant.
pub(crate) async fn build_candidate(
    state: &AppState,
    event_id: &str,
    req: &AddCandidateRequest,
    lang: Lang,
) -> Result<LocationCandidate, AppError> {
    if let Some(restaurant_id) = req.restaurant_id.as_deref().filter(|id| !id.is_empty()) {
        let restaurant = state.restaurant_repo.find_by_id(restaurant_id).await?
            .ok_or_else(|| AppError::NotFound(lang.pick("Restaurant not found", "お店が見つかりません").into()))?;
        let name = validate_candidate_name(&restaurant.name).map_err(|e| e.localized(lang))?;
        return Ok(LocationCandidate::restaurant(event_id.to_string(), name, restaurant.id));
    }

    match req.name.as_deref() {
        Some(raw) => {
            let name = validate_candidate_name(raw).map_err(|e| e.localized(lang))?;
            Ok(LocationCandidate::free(event_id.to_string(), name))
        }
        None => Err(ValidationError::CandidateSourceMissing.localized(lang)),
    }
}

async fn load_candidate(state: &AppState, event_id: &str, candidate_id: &str, lang: Lang) -> Result<LocationCandidate, AppError> {
    state.location_repo.find_candidate(event_id, candidate_id).await?
        .ok_or_else(|| AppError::NotFound(lang.pick("Location not found", "場所の候補が見つかりません").into()))
}

pub async fn add_candidate(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
    Json(payload): Json<AddCandidateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let candidate = build_candidate(&state, &event.id, &payload, lang).await?;

    if state.location_repo.find_candidate_by_name(&event.id, &candidate.name).await?.is_some() {
        return Err(ValidationError::CandidateDuplicate.localized(lang));
    }

    let created = state.location_repo.create_candidate(&candidate).await?;
    info!("Added {} location candidate {} to event {}", created.candidate_type, created.id, event.id);
    Ok(Json(created))
}

pub async fn list_candidates(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let candidates = state.location_repo.list_candidates(&event.id).await?;
    let votes = state.location_repo.list_votes_by_event(&event.id).await?;
    Ok(Json(tally_candidates(candidates, &votes)))
}

pub async fn remove_candidate(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path((token, candidate_id)): Path<(String, String)>,
    payload: Option<Json<CreatorAuthRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.unwrap_or_default();
    let event = load_event(&state, &token, lang).await?;
    ensure_creator(&event, payload.creator_password.as_deref(), lang)?;

    let candidate = load_candidate(&state, &event.id, &candidate_id, lang).await?;
    state.location_repo.delete_candidate(&event.id, &candidate.id).await?;
    info!("Removed location candidate {} from event {}", candidate.id, event.id);
    Ok(Json(serde_json::json!({ "deleted": candidate.id })))
}

pub async fn vote_location(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path((token, candidate_id)): Path<(String, String)>,
    Json(payload): Json<IdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let candidate = load_candidate(&state, &event.id, &candidate_id, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;

    let existing = state.location_repo.find_votes_by_voter(&candidate.id, &name).await?;
    match resolve(existing, password) {
        Resolution::Existing(vote) => Ok(Json(LocationVoteResponse { vote, created: false })),
        Resolution::New => {
            let vote = LocationVote::new(event.id.clone(), candidate.id.clone(), name, hash_optional(password)?);
            let vote = state.location_repo.create_vote(&vote).await?;
            info!("Vote {} recorded for location candidate {}", vote.id, candidate.id);
            Ok(Json(LocationVoteResponse { vote, created: true }))
        }
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}

pub async fn unvote_location(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path((token, candidate_id)): Path<(String, String)>,
    Json(payload): Json<IdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let candidate = load_candidate(&state, &event.id, &candidate_id, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;

    let existing = state.location_repo.find_votes_by_voter(&candidate.id, &name).await?;
    match resolve(existing, password) {
        Resolution::Existing(vote) => {
            state.location_repo.delete_vote(&vote.id).await?;
            info!("Vote {} withdrawn from location candidate {}", vote.id, candidate.id);
            Ok(Json(serde_json::json!({ "deleted": vote.id })))
        }
        Resolution::New => Err(IdentityError::NoMatch.localized(lang)),
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}
