use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::{
    requests::{IdentityRequest, UpsertRestaurantRequest},
    responses::RestaurantVoteResponse,
};
use crate::api::extractors::lang::RequestLang;
use crate::api::handlers::load_event;
use crate::domain::models::restaurant::{NewRestaurantParams, Restaurant, RestaurantVote};
use crate::domain::services::{
    i18n::Lang,
    identity::{hash_optional, resolve, IdentityError, Resolution},
    tally::tally_restaurants,
    validation::{validate_candidate_name, validate_coordinates, validate_name, validate_password, validate_place_id},
};
use crate::error::AppError;
use crate::state::AppState;

async fn load_restaurant(state: &AppState, id: &str, lang: Lang) -> Result<Restaurant, AppError> {
    state.restaurant_repo.find_by_id(id).await?
        .ok_or_else(|| AppError::NotFound(lang.pick("Restaurant not found", "お店が見つかりません").into()))
}

pub async fn upsert_restaurant(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Json(payload): Json<UpsertRestaurantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let place_id = validate_place_id(&payload.place_id).map_err(|e| e.localized(lang))?;
    let name = validate_candidate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let (latitude, longitude) = validate_coordinates(payload.latitude, payload.longitude)
        .map_err(|e| e.localized(lang))?;

    let restaurant = Restaurant::new(NewRestaurantParams {
        name,
        address: payload.address.trim().to_string(),
        latitude,
        longitude,
        place_id,
        rating: payload.rating,
        user_ratings_total: payload.user_ratings_total,
    });

    let saved = state.restaurant_repo.upsert(&restaurant).await?;
    info!("Stored restaurant {} (place {})", saved.id, saved.place_id);
    Ok(Json(saved))
}

pub async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = load_restaurant(&state, &id, lang).await?;
    Ok(Json(restaurant))
}

pub async fn vote_restaurant(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path((token, restaurant_id)): Path<(String, String)>,
    Json(payload): Json<IdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let restaurant = load_restaurant(&state, &restaurant_id, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;

    let existing = state.restaurant_repo.find_votes_by_voter(&event.id, &restaurant.id, &name).await?;
    match resolve(existing, password) {
        Resolution::Existing(vote) => Ok(Json(RestaurantVoteResponse { vote, created: false })),
        Resolution::New => {
            let vote = RestaurantVote::new(event.id.clone(), restaurant.id.clone(), name, hash_optional(password)?);
            let vote = state.restaurant_repo.create_vote(&vote).await?;
            info!("Vote {} recorded for restaurant {} in event {}", vote.id, restaurant.id, event.id);
            Ok(Json(RestaurantVoteResponse { vote, created: true }))
        }
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}

pub async fn unvote_restaurant(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path((token, restaurant_id)): Path<(String, String)>,
    Json(payload): Json<IdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let restaurant = load_restaurant(&state, &restaurant_id, lang).await?;

    let name = validate_name(&payload.name).map_err(|e| e.localized(lang))?;
    let password = validate_password(payload.password.as_deref()).map_err(|e| e.localized(lang))?;

    let existing = state.restaurant_repo.find_votes_by_voter(&event.id, &restaurant.id, &name).await?;
    match resolve(existing, password) {
        Resolution::Existing(vote) => {
            state.restaurant_repo.delete_vote(&vote.id).await?;
            info!("Vote {} withdrawn from restaurant {}", vote.id, restaurant.id);
            Ok(Json(serde_json::json!({ "deleted": vote.id })))
        }
        Resolution::New => Err(IdentityError::NoMatch.localized(lang)),
        Resolution::Collision => Err(IdentityError::NameTaken.localized(lang)),
    }
}

pub async fn restaurant_tally(
    State(state): State<Arc<AppState>>,
    RequestLang(lang): RequestLang,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_event(&state, &token, lang).await?;
    let restaurants = state.restaurant_repo.list_voted_in_event(&event.id).await?;
    let votes = state.restaurant_repo.list_votes_by_event(&event.id).await?;
    Ok(Json(tally_restaurants(restaurants, &votes)))
}
