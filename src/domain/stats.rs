//! Aggregate statistics over one curated snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CuratedEvent, MagnitudeBand};

/// Summary of a curated snapshot as served by `/earthquakes/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuakeStats {
    /// Number of events in the snapshot.
    pub total_events: usize,
    /// Largest magnitude, counting unknown magnitudes as `0.0`.
    ///
    /// A snapshot that is empty or has no known magnitude reports `0.0`.
    pub max_magnitude: f64,
    /// Event count per band; bands with no events are omitted.
    #[schema(value_type = Object)]
    pub count_by_mag_band: BTreeMap<MagnitudeBand, usize>,
}

impl QuakeStats {
    /// Aggregates the given events.
    #[must_use]
    pub fn from_events(events: &[CuratedEvent]) -> Self {
        let max_magnitude = events
            .iter()
            .map(|e| e.magnitude.unwrap_or(0.0))
            .reduce(f64::max)
            .unwrap_or(0.0);

        let mut count_by_mag_band = BTreeMap::new();
        for event in events {
            *count_by_mag_band.entry(event.magnitude_band).or_insert(0) += 1;
        }

        Self {
            total_events: events.len(),
            max_magnitude,
            count_by_mag_band,
        }
    }
}
