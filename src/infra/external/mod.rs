pub mod nominatim_geocoding;
pub mod open_meteo_weather;
pub mod google_places;

use std::time::Duration;
use reqwest::{Client, Response};
use tracing::error;

use crate::error::AppError;

const USER_AGENT: &str = concat!("lunch-backend/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Turns transport failures and non-2xx statuses into `AppError::Upstream`.
pub(crate) async fn check_response(service: &str, res: Result<Response, reqwest::Error>) -> Result<Response, AppError> {
    // Request URLs may carry API keys in the query string.
    let response = res.map_err(|e| {
        let msg = format!("{} connection error: {}", service, e.without_url());
        error!("{}", msg);
        AppError::Upstream(msg)
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let msg = format!("{} failed. Status: {}, Body: {}", service, status, text);
        error!("{}", msg);
        return Err(AppError::Upstream(msg));
    }

    Ok(response)
}

pub(crate) fn decode_error(service: &str, e: reqwest::Error) -> AppError {
    error!("Failed to parse {} response JSON: {:?}", service, e.without_url());
    AppError::Upstream(format!("{} returned an unexpected payload", service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_errors_do_not_echo_the_url() {
        let res = http_client().get("http://127.0.0.1:1/search").query(&[("key", "secret-key-123")]).send().await;
        assert!(res.is_err());

        match check_response("Places service", res).await {
            Err(AppError::Upstream(msg)) => {
                assert!(msg.starts_with("Places service connection error"));
                assert!(!msg.contains("secret-key-123"));
            }
            other => panic!("expected upstream error, got {:?}", other.map(|r| r.status())),
        }
    }
}
