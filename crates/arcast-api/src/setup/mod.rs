//! Application assembly: storage, converter, routes, server.

pub mod routes;
pub mod server;

use crate::state::AppState;
use arcast_convert::create_converter;
use arcast_core::Config;
use arcast_storage::create_storage;
use axum::Router;
use std::sync::Arc;

/// Initialize storage, converter and routes from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let storage = create_storage(&config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialize storage backend: {}", e))?;

    let converter = create_converter(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialize converter: {}", e))?;

    tracing::info!(
        backend = ?config.storage_backend,
        bucket = %config.storage_bucket,
        strategy = converter.strategy(),
        "services initialized"
    );

    let state = Arc::new(AppState::new(config.clone(), storage, converter));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
