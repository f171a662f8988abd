//! HTTP adapter for the NearBuy REST API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, sent with
//! `credentials: include` so the backend session cookie rides along.
//! Server-side (SSR) and native builds without a transport of their own get
//! a stub that reports a network failure.
//!
//! ERROR HANDLING
//! ==============
//! `Transport::send` only fails when no response arrived. Any HTTP status,
//! including 4xx/5xx, comes back as an `ApiResponse`; flows decide what a
//! non-2xx means for their endpoint family.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ClientError;
use super::types::{AppInfo, HealthStatus};

pub const DEFAULT_API_BASE: &str = "/api/v1";

pub const AUTH_CHECK_PATH: &str = "/users/auth";
pub const LOGIN_PATH: &str = "/users/login";
pub const LOGOUT_PATH: &str = "/users/logout";
pub const SIGNUP_USER_PATH: &str = "/users/signup/user";
pub const SIGNUP_VENDOR_PATH: &str = "/users/signup/vendor";
pub const NEARBY_SEARCH_PATH: &str = "/search/nearby";
pub const HEALTH_PATH: &str = "/status/health";
pub const INFO_PATH: &str = "/status/info";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A backend call, relative to the configured API base.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self { method: Method::Get, path: path.to_owned(), query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self { method: Method::Post, path: path.to_owned(), query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First query value recorded under `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Raw backend answer: HTTP status plus the decoded JSON (or `Null`).
///
/// Backend handlers answer with a `{ message, status, body }` envelope;
/// framework-level rejections answer with `{ detail }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub json: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, json: Value) -> Self {
        Self { status, json }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Envelope `message`, when present and non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str).filter(|m| !m.is_empty())
    }

    /// Framework `detail`: a string, or the joined `msg` entries of a
    /// validation error list.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self.json.get("detail")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(|item| item.get("msg")?.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }

    /// Best user-facing error text: `detail` first, then `message`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.detail().or_else(|| self.message().map(str::to_owned))
    }

    /// The envelope `body` member (`Null` when absent).
    #[must_use]
    pub fn payload(&self) -> &Value {
        self.json.get("body").unwrap_or(&Value::Null)
    }

    /// Decode the envelope `body` member.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the payload does not match `T`.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.payload())
    }

    /// Convert a non-2xx answer into a generic request error.
    #[must_use]
    pub fn into_request_error(self) -> ClientError {
        ClientError::Request { status: self.status, message: self.error_message().unwrap_or_default() }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends one request to the backend. Futures are `!Send`: browser fetch
/// handles are not thread-safe.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Where the backend API lives, relative or absolute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Base from the compile-time `NEARBUY_API_BASE`, else [`DEFAULT_API_BASE`].
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("NEARBUY_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

/// Browser transport backed by `gloo-net`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    config: ApiConfig,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(ApiConfig::from_build_env())
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use web_sys::RequestCredentials;

            let url = self.config.url(&request.path);
            let builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
            }
            .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .credentials(RequestCredentials::Include);

            let built = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ClientError::Network(e.to_string()))?;

            let resp = built.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
            let status = resp.status();
            let json = resp
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str(&text).ok())
                .unwrap_or(Value::Null);
            Ok(ApiResponse::new(status, json))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.config, request);
            Err(ClientError::Network("not available on server".to_owned()))
        }
    }
}

// =============================================================================
// STATUS CHECKS
// =============================================================================

/// Fetch `GET /status/health`.
///
/// # Errors
///
/// Network failures, non-2xx statuses, and malformed bodies.
pub async fn fetch_health<T: Transport + ?Sized>(api: &T) -> Result<HealthStatus, ClientError> {
    fetch_status_body(api, HEALTH_PATH).await
}

/// Fetch `GET /status/info`.
///
/// # Errors
///
/// Network failures, non-2xx statuses, and malformed bodies.
pub async fn fetch_info<T: Transport + ?Sized>(api: &T) -> Result<AppInfo, ClientError> {
    fetch_status_body(api, INFO_PATH).await
}

async fn fetch_status_body<T, B>(api: &T, path: &str) -> Result<B, ClientError>
where
    T: Transport + ?Sized,
    B: DeserializeOwned,
{
    let resp = api.send(ApiRequest::get(path)).await?;
    if !resp.is_success() {
        return Err(resp.into_request_error());
    }
    resp.decode_payload()
        .map_err(|e| ClientError::Request { status: resp.status, message: format!("malformed {path} body: {e}") })
}
