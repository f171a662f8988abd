//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR pages, the compiled WASM bundle
//! under `/pkg`, the `/api/v1` proxy to the NearBuy backend and a liveness
//! check at `/healthz`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::proxy::{self, ProxyState};

/// Full application router.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded or the
/// proxy's HTTP client cannot be built.
pub fn app(config: &ServerConfig) -> Result<Router, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(service_routes(ProxyState::new(config)?)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// Non-page routes: liveness check and the API proxy.
fn service_routes(proxy: ProxyState) -> Router {
    Router::new().route("/healthz", get(healthz)).merge(proxy::router(proxy))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
