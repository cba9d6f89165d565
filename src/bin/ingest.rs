//! quake-ingest: one scheduled ingestion run.
//!
//! Fetches the feed, writes the raw and curated snapshots and prints the
//! written keys as JSON. Exits non-zero on failure so the scheduler can
//! apply its own retry and alerting policy.

use std::sync::Arc;

use anyhow::Context;

use quake_feed::config::ServiceConfig;
use quake_feed::ingest::{FeedClient, Ingestor};
use quake_feed::storage::{BlobStore, FsBlobStore};
use quake_feed::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_format);

    let store: Arc<dyn BlobStore> =
        Arc::new(FsBlobStore::new(&config.blob_store_root, &config.quakes_bucket));
    let feed = FeedClient::new(config.usgs_feed_url.clone(), config.fetch_timeout)
        .context("building feed client")?;
    let ingestor = Ingestor::new(store, feed);

    let report = match ingestor.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "ingestion run failed");
            return Err(e).context("ingestion run failed");
        }
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
