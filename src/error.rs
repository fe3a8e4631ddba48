use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

/// Maps the driver error codes we know how to explain; everything else is a 500.
///
/// Postgres reports SQLSTATE, SQLite its extended result code.
pub fn classify_db_code(code: &str) -> Option<(StatusCode, &'static str, &'static str)> {
    match code {
        "23505" | "2067" | "1555" => Some((StatusCode::CONFLICT, "DUPLICATE", "Resource already exists (duplicate entry)")),
        "23503" | "787" => Some((StatusCode::NOT_FOUND, "REFERENCE_NOT_FOUND", "Referenced record not found")),
        "23502" | "1299" => Some((StatusCode::BAD_REQUEST, "MISSING_FIELD", "Required field missing")),
        "22001" => Some((StatusCode::BAD_REQUEST, "VALUE_TOO_LONG", "Value too long")),
        _ => None,
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::InternalWithMsg(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error()
                    && let Some((status, code, message)) = db_err.code().as_deref().and_then(classify_db_code) {
                    return (
                        status,
                        Json(json!({ "error": message, "code": code }))
                    ).into_response();
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(msg) => {
                error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "External service error".to_string())
            }
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_driver_codes() {
        assert_eq!(classify_db_code("23505").map(|c| c.0), Some(StatusCode::CONFLICT));
        assert_eq!(classify_db_code("2067").map(|c| c.0), Some(StatusCode::CONFLICT));
        assert_eq!(classify_db_code("787").map(|c| c.1), Some("REFERENCE_NOT_FOUND"));
        assert_eq!(classify_db_code("22001").map(|c| c.0), Some(StatusCode::BAD_REQUEST));
        assert!(classify_db_code("40001").is_none());
    }

    #[test]
    fn upstream_detail_is_not_leaked() {
        let response = AppError::Upstream("api key rejected: sk-123".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
