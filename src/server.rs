//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, state wiring, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Opens the quota and link store namespaces, in that order.
///
/// With `STORE_BACKEND=memory` both namespaces are separate process-local maps.
/// Otherwise each namespace gets its own Redis connection on its own logical
/// database.
///
/// # Errors
///
/// Returns an error if Redis is unreachable. Both the quota and the links live
/// in the store, so there is no degraded mode to fall back to.
pub async fn connect_stores(
    config: &Config,
) -> Result<(Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>)> {
    if config.store_backend == "memory" {
        tracing::warn!("Using in-memory store: quotas and links are lost on restart");
        return Ok((Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())));
    }

    let quota = RedisStore::connect(
        &config.redis_url_for(config.quota_db)?,
        config.store_timeout(),
        "quota",
    )
    .await
    .context("Failed to connect to the quota store")?;

    let links = RedisStore::connect(
        &config.redis_url_for(config.link_db)?,
        config.store_timeout(),
        "links",
    )
    .await
    .context("Failed to connect to the link store")?;

    tracing::info!("Connected to Redis");

    Ok((Arc::new(quota), Arc::new(links)))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Quota and link stores
/// - Application state
/// - Axum HTTP server, stopped gracefully on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - A store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (quota_store, link_store) = connect_stores(&config).await?;

    let state = AppState::new(&config, quota_store, link_store);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!("Failed to listen for Ctrl+C: {}. Shutting down.", e),
    }
}
