//! Latest-snapshot selection.
//!
//! Lists every object under a prefix (all pages) and picks the one with
//! the greatest storage-reported modification time. Linear in the number
//! of objects per call.

use serde_json::Value;

use super::{BlobStore, ObjectMeta, StorageError};

/// Returns the metadata of the most recently modified object under
/// `prefix`, or `None` if the prefix is empty.
///
/// Ties on `last_modified` resolve to whichever object the listing
/// yields last.
///
/// # Errors
///
/// Returns a [`StorageError`] if listing fails.
pub async fn latest_object(
    store: &dyn BlobStore,
    prefix: &str,
) -> Result<Option<ObjectMeta>, StorageError> {
    let objects = store.list(prefix).await?;
    Ok(objects.into_iter().max_by_key(|meta| meta.last_modified))
}

/// Returns the key and stored bytes of the newest object under `prefix`.
///
/// `Ok(None)` means the category holds no objects yet.
///
/// # Errors
///
/// Returns a [`StorageError`] if listing or reading fails.
pub async fn latest_bytes(
    store: &dyn BlobStore,
    prefix: &str,
) -> Result<Option<(String, Vec<u8>)>, StorageError> {
    let Some(meta) = latest_object(store, prefix).await? else {
        tracing::debug!(prefix, "no snapshot stored yet");
        return Ok(None);
    };
    let bytes = store.get(&meta.key).await?;
    tracing::debug!(key = %meta.key, "selected latest snapshot");
    Ok(Some((meta.key, bytes)))
}

/// Returns the parsed JSON content of the newest object under `prefix`.
///
/// `Ok(None)` means the category holds no objects yet.
///
/// # Errors
///
/// Returns a [`StorageError`] if listing or reading fails, and
/// [`StorageError::Decode`] if the object is not JSON.
pub async fn latest_json(
    store: &dyn BlobStore,
    prefix: &str,
) -> Result<Option<Value>, StorageError> {
    let Some((key, bytes)) = latest_bytes(store, prefix).await? else {
        return Ok(None);
    };
    let value =
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode { key, source })?;
    Ok(Some(value))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;

    use super::*;
    use crate::storage::{JSON_CONTENT_TYPE, MemoryBlobStore};

    #[tokio::test]
    async fn empty_category_is_none() {
        let store = MemoryBlobStore::new();
        let result = latest_json(&store, "raw/").await;
        let Ok(latest) = result else {
            panic!("empty listing must not fail");
        };
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn picks_max_last_modified_regardless_of_key_order() {
        // Page size 1 forces the selector through every listing page.
        let store = MemoryBlobStore::with_page_size(1);
        let t1 = Utc::now() - Duration::minutes(30);
        let t2 = t1 + Duration::minutes(10);
        let t3 = t2 + Duration::minutes(10);

        // Key order: a (T2), b (T3), c (T1).
        store
            .insert_at("raw/a.json", br#"{"n":2}"#.to_vec(), JSON_CONTENT_TYPE, t2)
            .await;
        store
            .insert_at("raw/b.json", br#"{"n":3}"#.to_vec(), JSON_CONTENT_TYPE, t3)
            .await;
        store
            .insert_at("raw/c.json", br#"{"n":1}"#.to_vec(), JSON_CONTENT_TYPE, t1)
            .await;

        let Ok(Some(meta)) = latest_object(&store, "raw/").await else {
            panic!("expected an object");
        };
        assert_eq!(meta.key, "raw/b.json");

        let Ok(Some(value)) = latest_json(&store, "raw/").await else {
            panic!("expected a snapshot");
        };
        assert_eq!(value, json!({ "n": 3 }));

        let Ok(Some((key, bytes))) = latest_bytes(&store, "raw/").await else {
            panic!("expected a snapshot");
        };
        assert_eq!(key, "raw/b.json");
        assert_eq!(bytes, br#"{"n":3}"#.to_vec());
    }

    #[tokio::test]
    async fn other_categories_are_ignored() {
        let store = MemoryBlobStore::new();
        let now = Utc::now();
        store
            .insert_at("raw/x.json", b"[]".to_vec(), JSON_CONTENT_TYPE, now)
            .await;
        store
            .insert_at(
                "curated/x.json",
                b"[1]".to_vec(),
                JSON_CONTENT_TYPE,
                now + Duration::seconds(5),
            )
            .await;

        let Ok(Some(value)) = latest_json(&store, "raw/").await else {
            panic!("expected raw snapshot");
        };
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn non_json_object_is_an_error() {
        let store = MemoryBlobStore::new();
        store
            .insert_at("raw/bad.json", b"not json".to_vec(), JSON_CONTENT_TYPE, Utc::now())
            .await;
        let result = latest_json(&store, "raw/").await;
        assert!(matches!(result, Err(StorageError::Decode { .. })));
    }
}
