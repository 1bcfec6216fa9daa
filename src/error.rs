use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failure while talking to a search provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("no matching article found")]
    NoArticle,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NoArticle => (
                StatusCode::NOT_FOUND,
                "no matching article found".to_string(),
            ),
            // Upstream details stay in the logs; callers get a generic message.
            ApiError::Upstream(err) => {
                log::error!("upstream request failed: {err:#}");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream search provider unavailable".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
