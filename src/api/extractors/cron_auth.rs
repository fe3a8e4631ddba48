use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Admits callers presenting `Authorization: Bearer {CRON_SECRET}`.
pub struct CronAuth;

fn digest(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

impl FromRequestParts<Arc<AppState>> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.cron_secret.as_deref() else {
            warn!("Cron call rejected: CRON_SECRET is not configured");
            return Err(AppError::Unauthorized);
        };

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        // Compare fixed-length digests instead of the raw strings.
        if digest(presented.trim()) != digest(secret) {
            warn!("Cron call rejected: bad secret");
            return Err(AppError::Unauthorized);
        }

        Ok(CronAuth)
    }
}
