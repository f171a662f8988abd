//! Server configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8059";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend origin; `/api/v1/...` paths are appended as received.
    pub backend_url: String,
    pub proxy_timeout: Duration,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `NEARBUY_BACKEND_URL`: default `http://localhost:8059`
    /// - `NEARBUY_PROXY_TIMEOUT_SECS`: default 30
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let backend_url = lookup("NEARBUY_BACKEND_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ServerError::InvalidConfig { var: "NEARBUY_BACKEND_URL", value: backend_url });
        }
        let timeout_secs =
            parse_or("NEARBUY_PROXY_TIMEOUT_SECS", lookup("NEARBUY_PROXY_TIMEOUT_SECS"), DEFAULT_PROXY_TIMEOUT_SECS)?;

        Ok(Self {
            port,
            backend_url: backend_url.trim_end_matches('/').to_owned(),
            proxy_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ServerError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ServerError::InvalidConfig { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
