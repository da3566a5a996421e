//! Climate Dashboard - Server

use climate_dashboard::{create_app, external::ClimateClient, store::FileStore, AppState, Config};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Climate Dashboard");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Climate API: {}", config.climate_api.base_url);

    let store = FileStore::new(&config.storage.path);
    tracing::info!("Persisting preferences to {}", store.path().display());

    let client = ClimateClient::new(config.climate_api.base_url.clone());
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, client, Arc::new(store));

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
