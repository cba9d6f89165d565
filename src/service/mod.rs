//! Service layer: read-side query orchestration.
//!
//! [`SnapshotService`] selects the latest snapshots from the injected
//! [`crate::storage::BlobStore`] and aggregates over them.

pub mod snapshot_service;

pub use snapshot_service::SnapshotService;
