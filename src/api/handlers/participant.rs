use axum::{extract::{State, Path}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::{
    requests::{IdentityRequest, RespondRequest},
    responses::RespondResponse,
};
use crate::api::extractors::lang::RequestLang;
use crate::api::handlers::load_event;
use crate::domain::models::participant::Participant;
use crate::domain::services::{
    identity::{hash_optional, resolve, IdentityError, Resolution},
    validation::{validate_comment, validate_name, validate_password},
};
use crate::error::AppError;
use crate::state::AppState;

/// Find-or-create by (name, password): a returning participant only updates their answer.
pub async fn respond(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
    Json(payload): Json<RespondRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;
    let comment = validate_comment(payload.comment.as_deref()).map_err(|e| e.localized(lang))?;

    let same_name = state.participant_repo.find_by_name(&event.id, &name).await?;
    match resolve(same_name, password) {
        Resolution::Existing(mut participant) => {
            participant.status = payload.status.as_str().to_string();
            participant.comment = comment;
            participant.updated_at = Utc::now();
            let participant = state.participant_repo.update(&participant).await?;
            info!("Participant {} updated answer for event {}", participant.id, event.id);
            Ok(Json(RespondResponse { participant, created: false }))
        }
        Resolution::New => {
            let participant = Participant::new(event.id.clone(), name, hash_optional(password)?, payload.status, comment);
            let participant = state.participant_repo.create(&participant).await?;
            info!("Participant {} joined event {}", participant.id, event.id);
            Ok(Json(RespondResponse { participant, created: true }))
        }
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let participants = state.participant_repo.list_by_event(&event.id).await?;
    Ok(Json(participants))
}

pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
    Json(payload): Json<IdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;

    let same_name = state.participant_repo.find_by_name(&event.id, &name).await?;
    match resolve(same_name, password) {
        Resolution::Existing(participant) => {
            state.participant_repo.delete(&participant.id).await?;
            info!("Participant {} withdrew from event {}", participant.id, event.id);
            Ok(Json(serde_json::json!({ "deleted": participant.id })))
        }
        Resolution::New => Err(IdentityError::NoMatch.localized(lang)),
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}
