use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the HTTP layer. Every variant renders the
/// `{ "success": false, "error": ... }` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("unknown algorithm '{given}'")]
    InvalidAlgorithm {
        given: String,
        available: Vec<&'static str>,
    },

    #[error("invalid credentials")]
    Unauthorized,

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("too many registration attempts")]
    RateLimited { retry_after_secs: u64 },

    #[error("record store unavailable")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": self.to_string() }),
            ),
            ApiError::InvalidAlgorithm { available, .. } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": self.to_string(),
                    "available": available,
                }),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": self.to_string() }),
            ),
            ApiError::UsernameTaken(_) => (
                StatusCode::CONFLICT,
                json!({ "success": false, "error": self.to_string() }),
            ),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "success": false,
                    "error": self.to_string(),
                    "retryAfter": retry_after_secs,
                }),
            ),
            // The store message is surfaced; reqwest errors don't carry
            // stack traces so nothing internal leaks here.
            ApiError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": self.to_string(),
                    "message": e.to_string(),
                }),
            ),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {body}");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_algorithm_lists_choices() {
        let err = ApiError::InvalidAlgorithm {
            given: "bogus".to_string(),
            available: vec!["hackernews", "top"],
        };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("q too short".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::UsernameTaken("alice".into())
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::RateLimited {
                retry_after_secs: 60
            }
            .into_response()
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
