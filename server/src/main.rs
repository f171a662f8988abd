mod config;
mod error;
mod proxy;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let app = routes::app(&config).expect("router init failed");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, backend = %config.backend_url, "nearbuy listening");
    axum::serve(listener, app).await.expect("server failed");
}
