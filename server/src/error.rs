//! Server error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Startup errors (`InvalidConfig`, `Leptos`, `HttpClient`) are fatal in
//! `main`. Request-time errors render as the backend's JSON envelope so the
//! browser client reads them like any other backend failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid {var}: {value:?}")]
    InvalidConfig { var: &'static str, value: String },
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("http client init failed: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("request body rejected: {0}")]
    RequestBody(String),
    #[error("backend unreachable: {0}")]
    Upstream(#[source] reqwest::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RequestBody(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidConfig { .. } | Self::Leptos(_) | Self::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Upstream(_) => "The NearBuy service is unavailable. Please try again later.".to_owned(),
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message, "status": status.as_u16(), "body": {} }))).into_response()
    }
}
