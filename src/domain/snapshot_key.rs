//! Timestamp-derived storage keys for raw and curated snapshots.
//!
//! Both objects written by one ingestion run share the same stamp:
//!
//! ```text
//! raw/20251203T033000Z.json
//! curated/20251203T033000Z.json
//! ```

use chrono::{DateTime, Utc};

/// `strftime` pattern of the key stamp (UTC, second granularity).
pub const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats the shared key stamp for one ingestion run.
#[must_use]
pub fn snapshot_stamp(at: DateTime<Utc>) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// Logical category of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// Upstream payload stored verbatim.
    Raw,
    /// Derived [`super::CuratedSnapshot`].
    Curated,
}

impl SnapshotKind {
    /// Key prefix shared by every object of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Raw => "raw/",
            Self::Curated => "curated/",
        }
    }

    /// Full object key for the given stamp.
    #[must_use]
    pub fn key_for_stamp(self, stamp: &str) -> String {
        format!("{}{stamp}.json", self.prefix())
    }
}
