//! quake-feed query server entry point.
//!
//! Serves the latest stored snapshots over HTTP.

use std::sync::Arc;

use quake_feed::api;
use quake_feed::app_state::{AppState, HealthInfo};
use quake_feed::config::ServiceConfig;
use quake_feed::service::SnapshotService;
use quake_feed::storage::{BlobStore, FsBlobStore};
use quake_feed::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        bucket = %config.quakes_bucket,
        "starting quake-feed"
    );

    // Build storage and service layers
    let store: Arc<dyn BlobStore> =
        Arc::new(FsBlobStore::new(&config.blob_store_root, &config.quakes_bucket));
    let snapshot_service = Arc::new(SnapshotService::new(store));

    // Build application state
    let app_state = AppState {
        snapshot_service,
        health: Arc::new(HealthInfo::from(&config)),
    };

    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
