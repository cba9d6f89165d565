//! Domain layer: snapshot keys, the curation transform and aggregation.
//!
//! Everything here is pure; storage and HTTP live in sibling modules.

pub mod curated_event;
pub mod feed;
pub mod magnitude_band;
pub mod snapshot_key;
pub mod stats;

pub use curated_event::{CuratedEvent, CuratedSnapshot};
pub use feed::curate;
pub use magnitude_band::MagnitudeBand;
pub use snapshot_key::{SnapshotKind, snapshot_stamp};
pub use stats::QuakeStats;
