//! One ingestion run: fetch, store raw, curate, store curated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FeedClient, IngestError};
use crate::domain::{SnapshotKind, curate, snapshot_stamp};
use crate::storage::{BlobStore, JSON_CONTENT_TYPE};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Key of the raw snapshot.
    #[serde(rename = "stored")]
    pub raw_key: String,
    /// Key of the curated snapshot.
    #[serde(rename = "curated")]
    pub curated_key: String,
    /// Number of curated events written.
    #[serde(rename = "events")]
    pub event_count: usize,
}

/// Writes feed snapshots into a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    store: Arc<dyn BlobStore>,
    feed: FeedClient,
}

impl Ingestor {
    /// Creates an ingestor writing into `store`.
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>, feed: FeedClient) -> Self {
        Self { store, feed }
    }

    /// Runs one ingestion: fetch the feed, then store both snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Fetch`] if the feed cannot be fetched (nothing
    /// is written), or an error from [`Self::store_snapshot`].
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        tracing::info!(url = %self.feed.url(), "fetching feed");
        let body = self.feed.fetch().await?;
        self.store_snapshot(body, Utc::now()).await
    }

    /// Stores the feed body `raw` byte-for-byte under `raw/` and its
    /// curated form under `curated/`, both keyed by the stamp of `at`.
    ///
    /// The body is parsed before anything is written. The raw object is
    /// written first; if the curated write fails the raw object stays
    /// behind without a curated counterpart.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidFeed`] if `raw` is not JSON (nothing
    /// is written), [`IngestError::Storage`] if either write fails and
    /// [`IngestError::Encode`] if the curated snapshot cannot be serialized.
    pub async fn store_snapshot(
        &self,
        raw: Vec<u8>,
        at: DateTime<Utc>,
    ) -> Result<IngestReport, IngestError> {
        let payload: Value = serde_json::from_slice(&raw).map_err(IngestError::InvalidFeed)?;

        let stamp = snapshot_stamp(at);
        let raw_key = SnapshotKind::Raw.key_for_stamp(&stamp);
        let curated_key = SnapshotKind::Curated.key_for_stamp(&stamp);

        self.store.put(&raw_key, raw, JSON_CONTENT_TYPE).await?;
        tracing::info!(key = %raw_key, "raw snapshot stored");

        let curated = curate(&payload);
        let curated_bytes = serde_json::to_vec(&curated)?;
        if let Err(e) = self
            .store
            .put(&curated_key, curated_bytes, JSON_CONTENT_TYPE)
            .await
        {
            tracing::error!(
                raw_key = %raw_key,
                key = %curated_key,
                error = %e,
                "curated write failed; raw snapshot has no curated counterpart"
            );
            return Err(e.into());
        }
        tracing::info!(key = %curated_key, events = curated.len(), "curated snapshot stored");

        Ok(IngestReport {
            raw_key,
            curated_key,
            event_count: curated.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::domain::CuratedSnapshot;
    use crate::storage::{ListPage, MemoryBlobStore, StorageError};

    fn feed_client() -> FeedClient {
        let Ok(client) = FeedClient::new("http://127.0.0.1:9/feed", Duration::from_secs(1)) else {
            panic!("client should build");
        };
        client
    }

    fn at() -> DateTime<Utc> {
        let Some(t) = Utc.with_ymd_and_hms(2025, 12, 3, 3, 30, 0).single() else {
            panic!("valid timestamp");
        };
        t
    }

    #[tokio::test]
    async fn writes_raw_and_curated_under_one_stamp() {
        let store = Arc::new(MemoryBlobStore::new());
        let ingestor = Ingestor::new(Arc::clone(&store) as Arc<dyn BlobStore>, feed_client());
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                { "id": "a", "properties": { "mag": 1.0 }, "geometry": { "coordinates": [1.0, 2.0, 3.0] } },
                { "id": "b", "properties": { "mag": 5.0 }, "geometry": null }
            ]
        });

        let Ok(report) = ingestor
            .store_snapshot(payload.to_string().into_bytes(), at())
            .await
        else {
            panic!("ingestion should succeed");
        };
        assert_eq!(report.raw_key, "raw/20251203T033000Z.json");
        assert_eq!(report.curated_key, "curated/20251203T033000Z.json");
        assert_eq!(report.event_count, 2);

        let Ok(raw) = store.get(&report.raw_key).await else {
            panic!("raw object missing");
        };
        let Ok(raw_value) = serde_json::from_slice::<Value>(&raw) else {
            panic!("raw object is not json");
        };
        assert_eq!(raw_value, payload);
        assert_eq!(
            store.content_type(&report.curated_key).await.as_deref(),
            Some(JSON_CONTENT_TYPE)
        );

        let Ok(curated) = store.get(&report.curated_key).await else {
            panic!("curated object missing");
        };
        let Ok(events) = serde_json::from_slice::<CuratedSnapshot>(&curated) else {
            panic!("curated object does not decode");
        };
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn raw_object_keeps_upstream_bytes() {
        let store = Arc::new(MemoryBlobStore::new());
        let ingestor = Ingestor::new(Arc::clone(&store) as Arc<dyn BlobStore>, feed_client());
        let body = br#"{"type": "FeatureCollection", "metadata": {"title": "t"}, "features": [], "bbox": [1, 2, 3]}"#;

        let Ok(report) = ingestor.store_snapshot(body.to_vec(), at()).await else {
            panic!("ingestion should succeed");
        };
        let Ok(raw) = store.get(&report.raw_key).await else {
            panic!("raw object missing");
        };
        assert_eq!(raw, body.to_vec());
    }

    #[tokio::test]
    async fn non_json_body_writes_nothing() {
        let store = Arc::new(MemoryBlobStore::new());
        let ingestor = Ingestor::new(Arc::clone(&store) as Arc<dyn BlobStore>, feed_client());

        let result = ingestor
            .store_snapshot(b"<html>oops</html>".to_vec(), at())
            .await;
        assert!(matches!(result, Err(IngestError::InvalidFeed(_))));
        assert!(store.is_empty().await);
    }

    #[test]
    fn report_serializes_with_short_names() {
        let report = IngestReport {
            raw_key: "raw/x.json".to_string(),
            curated_key: "curated/x.json".to_string(),
            event_count: 4,
        };
        let Ok(value) = serde_json::to_value(&report) else {
            panic!("report should serialize");
        };
        assert_eq!(
            value,
            json!({ "stored": "raw/x.json", "curated": "curated/x.json", "events": 4 })
        );
    }

    /// Accepts `raw/` writes and rejects everything else.
    #[derive(Debug, Default)]
    struct RawOnlyStore {
        inner: MemoryBlobStore,
    }

    #[async_trait]
    impl BlobStore for RawOnlyStore {
        async fn put(
            &self,
            key: &str,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> Result<(), StorageError> {
            if key.starts_with(SnapshotKind::Raw.prefix()) {
                self.inner.put(key, bytes, content_type).await
            } else {
                Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                })
            }
        }

        async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
            self.inner.get(key).await
        }

        async fn list_page(
            &self,
            prefix: &str,
            continuation: Option<String>,
        ) -> Result<ListPage, StorageError> {
            self.inner.list_page(prefix, continuation).await
        }
    }

    #[tokio::test]
    async fn curated_write_failure_leaves_orphaned_raw() {
        let store = Arc::new(RawOnlyStore::default());
        let ingestor = Ingestor::new(Arc::clone(&store) as Arc<dyn BlobStore>, feed_client());

        let result = ingestor
            .store_snapshot(br#"{"features":[]}"#.to_vec(), at())
            .await;
        assert!(matches!(result, Err(IngestError::Storage(_))));

        let Ok(raw) = store.list(SnapshotKind::Raw.prefix()).await else {
            panic!("listing failed");
        };
        assert_eq!(raw.len(), 1);
        let Ok(curated) = store.list(SnapshotKind::Curated.prefix()).await else {
            panic!("listing failed");
        };
        assert!(curated.is_empty());
    }
}
