//! Normalized per-feature rows written to `curated/` snapshots.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MagnitudeBand;

/// One row derived from a single upstream feature.
///
/// Every field except the band is nullable; missing source data never
/// drops the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CuratedEvent {
    /// Feed-assigned identifier.
    pub id: Option<String>,
    /// Origin time in milliseconds since the Unix epoch.
    pub time: Option<i64>,
    /// Reported magnitude.
    pub magnitude: Option<f64>,
    /// Band derived from `magnitude`.
    pub magnitude_band: MagnitudeBand,
    /// Free-text location description.
    pub place: Option<String>,
    /// Latitude in degrees (second coordinate of the source geometry).
    pub latitude: Option<f64>,
    /// Longitude in degrees (first coordinate of the source geometry).
    pub longitude: Option<f64>,
    /// Hypocenter depth in kilometers.
    pub depth_km: Option<f64>,
}

/// One ingestion run's curated output, in source feature order.
pub type CuratedSnapshot = Vec<CuratedEvent>;
