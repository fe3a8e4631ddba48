use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::cors::create_cors_layer;
use crate::api::handlers::{cron, event, external, health, location, participant, restaurant};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = create_cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health::health_check))

        // Events
        .route("/api/v1/events", post(event::create_event))
        .route("/api/v1/events/{token}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Attendance
        .route("/api/v1/events/{token}/participants", post(participant::respond).get(participant::list_participants).delete(participant::withdraw))

        // Location candidates & votes
        .route("/api/v1/events/{token}/locations", post(location::add_candidate).get(location::list_candidates))
        .route("/api/v1/events/{token}/locations/{candidate_id}", delete(location::remove_candidate))
        .route("/api/v1/events/{token}/locations/{candidate_id}/votes", post(location::vote_location).delete(location::unvote_location))

        // Restaurants
        .route("/api/v1/restaurants", post(restaurant::upsert_restaurant))
        .route("/api/v1/restaurants/{id}", get(restaurant::get_restaurant))
        .route("/api/v1/events/{token}/restaurants/votes", get(restaurant::restaurant_tally))
        .route("/api/v1/events/{token}/restaurants/{restaurant_id}/votes", post(restaurant::vote_restaurant).delete(restaurant::unvote_restaurant))

        // External proxies
        .route("/api/v1/geocode", get(external::geocode))
        .route("/api/v1/geocode/reverse", get(external::reverse_geocode))
        .route("/api/v1/weather", get(external::weather))
        .route("/api/v1/places/search", get(external::search_places))

        // Scheduler
        .route("/api/v1/cron/daily-reset", post(cron::daily_reset))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}
