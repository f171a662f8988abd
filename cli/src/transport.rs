//! `reqwest` implementation of the client `Transport` seam.
//!
//! Keeps one cookie jar per process, so a login followed by an
//! authenticated call in the same command reuses the backend session.

use async_trait::async_trait;
use client::net::api::{ApiConfig, ApiRequest, ApiResponse, Method, Transport};
use client::net::error::ClientError;
use serde_json::Value;

use crate::CliError;

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, config: ApiConfig::new(base_url) })
    }

    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, &url).query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let json = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
        tracing::debug!(status, "api response");
        Ok(ApiResponse::new(status, json))
    }
}
