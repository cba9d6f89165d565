//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::service::SnapshotService;

/// Deployment facts reported by `GET /health`.
#[derive(Debug, Clone)]
pub struct HealthInfo {
    /// Blob store bucket name.
    pub quakes_bucket: String,
    /// Upstream feed URL.
    pub usgs_feed_url: String,
}

impl From<&ServiceConfig> for HealthInfo {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            quakes_bucket: config.quakes_bucket.clone(),
            usgs_feed_url: config.usgs_feed_url.clone(),
        }
    }
}

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read path over stored snapshots.
    pub snapshot_service: Arc<SnapshotService>,
    /// Static facts for the health endpoint.
    pub health: Arc<HealthInfo>,
}
