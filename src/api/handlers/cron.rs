use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::extractors::cron_auth::CronAuth;
use crate::domain::services::reset::{run_daily_reset, today_in};
use crate::error::AppError;
use crate::state::AppState;

pub async fn daily_reset(
    State(state): State<Arc<AppState>>,
    _auth: CronAuth,
) -> Result<impl IntoResponse, AppError> {
    let today = today_in(state.config.timezone, Utc::now());
    info!("Daily reset triggered for {}", today);

    let report = run_daily_reset(state.event_repo.as_ref(), today).await?;
    info!("Daily reset finished: {} events reset", report.reset_count);

    Ok(Json(report))
}
