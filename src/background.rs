use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;
use crate::domain::services::reset::{run_daily_reset, today_in};

/// Runs the daily reset on a fixed interval, for deployments without an external scheduler.
pub async fn start_reset_worker(state: Arc<AppState>, interval: Duration) {
    info!("Starting daily reset worker (every {}s)...", interval.as_secs());

    loop {
        let today = today_in(state.config.timezone, Utc::now());
        let span = info_span!("daily_reset", date = %today);

        async {
            match run_daily_reset(state.event_repo.as_ref(), today).await {
                Ok(report) if report.reset_count > 0 => info!("Reset {} events", report.reset_count),
                Ok(_) => {}
                Err(e) => error!("Daily reset failed: {:?}", e),
            }
        }
            .instrument(span)
            .await;

        sleep(interval).await;
    }
}
