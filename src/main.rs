use anyhow::Context;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use umrah_portal_api::config::AppConfig;
use umrah_portal_api::database::DatabaseManager;
use umrah_portal_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORTAL_STORE_URL, PORTAL_SERVICE_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("umrah_portal_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Umrah Portal API in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("SECURITY_JWT_SECRET is not set; agent routes will reject every token");
    }

    let stores = DatabaseManager::connect(&config).context("failed to construct data stores")?;
    let port = config.api.port;
    let state = AppState::new(config, stores);

    let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Umrah Portal API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
