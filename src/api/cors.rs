use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info, warn};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// `origins` is `*` or a comma-separated list. No credentials are shared, so `*` is allowed.
pub fn create_cors_layer(origins: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
        ])
        .max_age(Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins(origins: &str) -> AllowOrigin {
    if origins.trim() == "*" {
        return AllowOrigin::any();
    }

    let list: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if list.is_empty() {
        warn!("CORS: No valid origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        info!("CORS: Configured with {} allowed origin(s)", list.len());
        AllowOrigin::list(list)
    }
}
