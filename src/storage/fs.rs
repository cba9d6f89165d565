//! Filesystem-backed blob store.
//!
//! Objects of bucket `b` live under `<root>/b/`, with `/`-separated keys
//! mapped onto subdirectories (`raw/20251203T033000Z.json` becomes
//! `<root>/b/raw/20251203T033000Z.json`). Writes land in a temp file that
//! is renamed into place, so a reader never observes a partial object.
//! The file mtime is the reported `last_modified`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;

use super::{BlobStore, ListPage, ObjectMeta, StorageError, paginate};

/// Number of objects per listing page.
pub const PAGE_SIZE: usize = 1000;

const TEMP_PREFIX: &str = ".tmp-";

/// Blob store rooted at one bucket directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    bucket_dir: PathBuf,
    page_size: usize,
}

impl FsBlobStore {
    /// Opens (lazily) the bucket directory `<root>/<bucket>`.
    ///
    /// Nothing touches the filesystem until the first call.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, bucket: &str) -> Self {
        Self {
            bucket_dir: root.as_ref().join(bucket),
            page_size: PAGE_SIZE,
        }
    }

    /// Overrides the listing page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Directory holding this bucket's objects.
    #[must_use]
    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.bucket_dir.clone();
        for segment in key.split('/') {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.starts_with(TEMP_PREFIX)
                || segment.contains('\\')
            {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            path.push(segment);
        }
        Ok(path)
    }

    /// Collects every object whose key starts with `prefix`, sorted by key.
    ///
    /// The walk starts at the deepest directory the prefix names, so
    /// sibling categories are never read.
    async fn scan(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StorageError> {
        let (start, key_prefix) = match prefix.rsplit_once('/') {
            None => (self.bucket_dir.clone(), String::new()),
            Some((dir, _)) => match self.object_path(dir) {
                Ok(path) => (path, format!("{dir}/")),
                // No stored key can live below an unrepresentable directory.
                Err(_) => return Ok(Vec::new()),
            },
        };

        let mut objects: Vec<ObjectMeta> = walk(start, key_prefix)
            .await?
            .into_iter()
            .filter(|meta| meta.key.starts_with(prefix))
            .collect();
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }
}

/// Collects every object below `dir`, whose keys start with `key_prefix`.
async fn walk(dir: PathBuf, key_prefix: String) -> Result<Vec<ObjectMeta>, StorageError> {
    let mut objects = Vec::new();
    let mut pending = vec![(dir, key_prefix)];

    while let Some((dir, key_prefix)) = pending.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                continue;
            }
            Err(e) => return Err(io_error(&key_prefix, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&key_prefix, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(TEMP_PREFIX) {
                continue;
            }
            let key = format!("{key_prefix}{name}");
            let metadata = entry.metadata().await.map_err(|e| io_error(&key, e))?;
            if metadata.is_dir() {
                pending.push((entry.path(), format!("{key}/")));
            } else if metadata.is_file() {
                let modified = metadata.modified().map_err(|e| io_error(&key, e))?;
                objects.push(ObjectMeta {
                    key,
                    last_modified: DateTime::<Utc>::from(modified),
                });
            }
        }
    }
    Ok(objects)
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.object_path(key)?;
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::InvalidKey(key.to_string()))?;
        fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(key, e))?;

        let temp = parent.join(format!("{TEMP_PREFIX}{}", uuid::Uuid::new_v4()));
        fs::write(&temp, &bytes)
            .await
            .map_err(|e| io_error(key, e))?;
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(key, e));
        }
        tracing::debug!(key, bytes = bytes.len(), "object written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StorageError> {
        let objects = self.scan(prefix).await?;
        Ok(paginate(objects, continuation.as_deref(), self.page_size))
    }

    /// One directory walk for the whole listing instead of one per page.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StorageError> {
        self.scan(prefix).await
    }
}
