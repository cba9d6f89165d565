//! Ingestion: fetch the upstream feed and persist raw + curated snapshots.
//!
//! One call to [`Ingestor::run`] is one scheduled run. Nothing is kept
//! between runs; each run writes two new timestamp-keyed objects.

pub mod feed_client;
pub mod ingestor;

pub use feed_client::FeedClient;
pub use ingestor::{IngestReport, Ingestor};

use crate::storage::StorageError;

/// Failures that abort an ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Upstream request failed: network error, timeout or non-success
    /// status.
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Upstream body is not a JSON document.
    #[error("feed body is not valid json: {0}")]
    InvalidFeed(#[source] serde_json::Error),

    /// A snapshot could not be written.
    #[error("snapshot write failed: {0}")]
    Storage(#[from] StorageError),

    /// A snapshot could not be serialized.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
