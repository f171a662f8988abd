//! Same-origin proxy for the NearBuy REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client calls `/api/v1/...` on the origin that served the page.
//! This module forwards those calls to the configured backend unchanged, so
//! the backend's session cookie is first-party for the browser.
//!
//! DESIGN
//! ======
//! Bodies are buffered (API payloads are small JSON documents). Hop-by-hop
//! headers are dropped in both directions; `Cookie` goes upstream and every
//! `Set-Cookie` comes back down. Redirects are passed through, not followed.
//!
//! ERROR HANDLING
//! ==============
//! An unreachable or timed-out backend becomes `502`/`504` with a JSON
//! envelope; backend error statuses are relayed as-is.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use crate::config::ServerConfig;
use crate::error::ServerError;

pub const API_PREFIX: &str = "/api/v1";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Headers that describe one connection and never cross the proxy.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    backend_url: Arc<str>,
}

impl ProxyState {
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ServerError::HttpClient)?;
        Ok(Self { http, backend_url: Arc::from(config.backend_url.as_str()) })
    }
}

/// Routes for `/api/v1/*`, ready to merge into the app router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(&format!("{API_PREFIX}/{{*path}}"), any(forward))
        .with_state(state)
}

/// Upstream URL for an incoming `/api/v1/...` request, query included.
pub fn upstream_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{backend_url}{path_and_query}")
}

pub fn is_forwardable(name: &HeaderName) -> bool {
    !HOP_BY_HOP.contains(&name.as_str())
}

/// Copy end-to-end headers. `Content-Length` is recomputed from the
/// buffered body on each side.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_forwardable(name) && name != axum::http::header::CONTENT_LENGTH {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

async fn forward(State(proxy): State<ProxyState>, request: Request) -> Response {
    match relay(&proxy, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "api proxy failed");
            e.into_response()
        }
    }
}

async fn relay(proxy: &ProxyState, request: Request) -> Result<Response, ServerError> {
    let (parts, body) = request.into_parts();
    let url = upstream_url(&proxy.backend_url, &parts.uri);
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ServerError::RequestBody(e.to_string()))?;

    tracing::debug!(method = %parts.method, %url, "proxying api request");
    let upstream = proxy
        .http
        .request(parts.method, &url)
        .headers(filter_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(ServerError::Upstream)?;

    let status = upstream.status();
    let headers = filter_headers(upstream.headers());
    let bytes = upstream.bytes().await.map_err(ServerError::Upstream)?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
