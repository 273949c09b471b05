//! camerpulse-gateway server entry point.
//!
//! Loads configuration, opens the store and serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use camerpulse_gateway::api;
use camerpulse_gateway::app_state::AppState;
use camerpulse_gateway::config::{GatewayConfig, LogFormat};
use camerpulse_gateway::persistence::{GatewayStore, MemoryStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()
        .map_err(|err| anyhow::anyhow!("invalid configuration: {err}"))?;

    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting camerpulse-gateway");

    // Build storage layer
    let store: Arc<dyn GatewayStore> = if config.persistence_enabled {
        let store = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        if config.database_run_migrations {
            store.migrate().await.context("running migrations")?;
            tracing::info!("database migrations applied");
        }
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, using in-memory store");
        Arc::new(MemoryStore::new())
    };

    // Build application
    let state = AppState::new(store).with_base_path(config.base_path.as_str());
    let app = api::build_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, base_path = %config.base_path, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}
