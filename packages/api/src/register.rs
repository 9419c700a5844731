//! Registration endpoint.

use std::time::Instant;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body accepted by `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub number: i64,
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Decode(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        }
    }
}

/// Decode a registration and acknowledge it.
///
/// Nothing is forwarded to the queue worker yet.
pub async fn register(body: Bytes) -> Result<&'static str, ApiError> {
    let start = Instant::now();

    let request: RegisterRequest = serde_json::from_slice(&body)?;
    tracing::debug!(?request, "Register request decoded");

    tracing::debug!(
        elapsed_micros = start.elapsed().as_micros() as u64,
        api_method = "register",
        "Time elapsed"
    );
    Ok("OK")
}
