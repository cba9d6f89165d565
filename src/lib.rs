//! # quake-feed
//!
//! Periodic ingestion of the USGS earthquake GeoJSON feed into a blob
//! store, and an HTTP API serving the latest snapshot plus aggregate
//! statistics.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler ──► quake-ingest (ingest/)
//!                   │  fetch feed, curate (domain/)
//!                   ▼
//!              BlobStore (storage/)
//!              raw/<stamp>.json, curated/<stamp>.json
//!                   ▲
//!                   │  latest snapshot (storage/latest)
//! Clients ──► REST Handlers (api/) ──► SnapshotService (service/)
//! ```
//!
//! The ingestor and the query service never talk to each other; they share
//! only timestamp-keyed objects in the store.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod service;
pub mod storage;
pub mod telemetry;
