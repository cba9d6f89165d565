//! Storage layer: flat key/value blob store holding the snapshots.
//!
//! Provides the [`BlobStore`] trait consumed by both the ingestor and the
//! query service. Listing is paginated the way object stores paginate:
//! each call returns one page sorted by key plus a continuation token.
//! [`latest::latest_json`] walks every page to pick the newest object.

pub mod fs;
pub mod latest;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use fs::FsBlobStore;
pub use latest::{latest_bytes, latest_json};
pub use memory::MemoryBlobStore;

/// Content type of every object this service writes.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object exists under the key.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Key cannot be mapped onto the backing store.
    #[error("invalid object key: {0:?}")]
    InvalidKey(String),

    /// Backend I/O failure.
    #[error("storage i/o error on {key}: {source}")]
    Io {
        /// Key (or prefix) being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored object is not valid JSON.
    #[error("object {key} is not valid json: {source}")]
    Decode {
        /// Object key.
        key: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Listing entry for one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Full object key.
    pub key: String,
    /// Storage-reported modification time.
    pub last_modified: DateTime<Utc>,
}

/// One page of a prefix listing.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Objects on this page, sorted by key.
    pub objects: Vec<ObjectMeta>,
    /// Token to pass back for the next page; `None` on the last page.
    pub next: Option<String>,
}

/// Flat key/value object store.
///
/// Implementations must be safe to share across tasks; the store is
/// injected into handlers and the ingestor as `Arc<dyn BlobStore>`.
#[async_trait]
pub trait BlobStore: std::fmt::Debug + Send + Sync {
    /// Writes `bytes` under `key`, replacing any previous object.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the object cannot be written.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
    -> Result<(), StorageError>;

    /// Reads the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the key does not exist.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Lists one page of objects whose key starts with `prefix`.
    ///
    /// `continuation` is the `next` token of the previous page.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the listing fails.
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StorageError>;

    /// Lists every object under `prefix`, draining all pages.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] raised by a page request.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StorageError> {
        let mut objects = Vec::new();
        let mut continuation = None;
        loop {
            let page = self.list_page(prefix, continuation).await?;
            objects.extend(page.objects);
            match page.next {
                Some(token) => continuation = Some(token),
                None => return Ok(objects),
            }
        }
    }
}

/// Cuts a key-sorted listing into one page starting after `continuation`.
pub(crate) fn paginate(
    sorted: impl IntoIterator<Item = ObjectMeta>,
    continuation: Option<&str>,
    page_size: usize,
) -> ListPage {
    let page_size = page_size.max(1);
    let mut remaining = sorted
        .into_iter()
        .filter(|meta| continuation.is_none_or(|after| meta.key.as_str() > after))
        .peekable();

    let objects: Vec<ObjectMeta> = remaining.by_ref().take(page_size).collect();
    let next = if remaining.peek().is_some() {
        objects.last().map(|meta| meta.key.clone())
    } else {
        None
    };
    ListPage { objects, next }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(key: &str) -> ObjectMeta {
        ObjectMeta {
            key: key.to_string(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn paginate_splits_and_resumes() {
        let all = vec![meta("a"), meta("b"), meta("c")];

        let first = paginate(all.clone(), None, 2);
        assert_eq!(first.objects.len(), 2);
        assert_eq!(first.next.as_deref(), Some("b"));

        let second = paginate(all, first.next.as_deref(), 2);
        assert_eq!(second.objects.len(), 1);
        assert_eq!(second.next, None);
    }

    #[test]
    fn exact_fit_has_no_next_token() {
        let page = paginate(vec![meta("a"), meta("b")], None, 2);
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.next, None);
    }
}
