//! Snapshot service: read-side queries over the stored snapshots.

use std::sync::Arc;

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::domain::{CuratedSnapshot, QuakeStats, SnapshotKind};
use crate::error::QuakeError;
use crate::storage::{BlobStore, StorageError, latest_bytes, latest_json};

/// Stateless read path shared by all HTTP handlers.
///
/// Every call re-lists the store; no snapshot is cached in process, so
/// repeated calls between ingestion runs return the same content.
#[derive(Debug, Clone)]
pub struct SnapshotService {
    store: Arc<dyn BlobStore>,
}

impl SnapshotService {
    /// Creates a new `SnapshotService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Latest raw feed payload, byte-for-byte as fetched.
    ///
    /// The bytes are checked to be JSON but never re-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::Storage`] if the store cannot be read or the
    /// object is not JSON.
    pub async fn latest_raw(&self) -> Result<Option<Vec<u8>>, QuakeError> {
        let Some((key, bytes)) =
            latest_bytes(self.store.as_ref(), SnapshotKind::Raw.prefix()).await?
        else {
            return Ok(None);
        };
        serde_json::from_slice::<IgnoredAny>(&bytes)
            .map_err(|source| StorageError::Decode { key, source })?;
        Ok(Some(bytes))
    }

    /// Latest curated snapshot as stored.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::Storage`] if the store cannot be read.
    pub async fn latest_curated(&self) -> Result<Option<Value>, QuakeError> {
        Ok(latest_json(self.store.as_ref(), SnapshotKind::Curated.prefix()).await?)
    }

    /// Statistics over the latest curated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::Storage`] if the store cannot be read and
    /// [`QuakeError::Decode`] if the snapshot is not a list of events.
    pub async fn stats(&self) -> Result<Option<QuakeStats>, QuakeError> {
        let Some(value) = self.latest_curated().await? else {
            return Ok(None);
        };
        let events: CuratedSnapshot = serde_json::from_value(value)?;
        Ok(Some(QuakeStats::from_events(&events)))
    }
}
