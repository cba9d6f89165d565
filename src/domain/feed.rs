//! Curation of the upstream GeoJSON feed.
//!
//! The feed is a `FeatureCollection` whose `features` entries carry an
//! `id`, a `properties` object (`time`, `mag`, `place`, ...) and a
//! `geometry` object with `coordinates: [lon, lat, depth]`. Its schema is
//! owned by the provider, so extraction is tolerant: anything missing or
//! of the wrong type becomes `None` for that field and the row is kept.

use serde_json::Value;

use super::{CuratedEvent, CuratedSnapshot, MagnitudeBand};

/// Converts one raw feed payload into a curated snapshot.
///
/// One output row per input feature, in input order. A payload without
/// a `features` array yields an empty snapshot.
#[must_use]
pub fn curate(payload: &Value) -> CuratedSnapshot {
    payload
        .get("features")
        .and_then(Value::as_array)
        .map(|features| features.iter().map(curate_feature).collect())
        .unwrap_or_default()
}

/// Converts a single feature into a [`CuratedEvent`].
#[must_use]
pub fn curate_feature(feature: &Value) -> CuratedEvent {
    let view = FeatureView::new(feature);
    let magnitude = view.property_f64("mag");
    let [longitude, latitude, depth_km] = view.coordinates();

    CuratedEvent {
        id: feature.get("id").and_then(Value::as_str).map(str::to_owned),
        time: view.property("time").and_then(epoch_millis),
        magnitude,
        magnitude_band: MagnitudeBand::from_magnitude(magnitude),
        place: view
            .property("place")
            .and_then(Value::as_str)
            .map(str::to_owned),
        latitude,
        longitude,
        depth_km,
    }
}

/// Reads an epoch-milliseconds value, accepting floats with no fractional
/// part (`1.7e12`) as well as integers.
fn epoch_millis(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && (-9.2e18..=9.2e18).contains(f))
            .map(|f| f as i64)
    })
}

/// Borrowed view over one feature with defaulted sub-documents.
///
/// `properties` and `geometry` that are absent, `null` or not objects
/// behave as empty objects.
struct FeatureView<'a> {
    properties: Option<&'a serde_json::Map<String, Value>>,
    geometry: Option<&'a serde_json::Map<String, Value>>,
}

impl<'a> FeatureView<'a> {
    fn new(feature: &'a Value) -> Self {
        Self {
            properties: feature.get("properties").and_then(Value::as_object),
            geometry: feature.get("geometry").and_then(Value::as_object),
        }
    }

    fn property(&self, name: &str) -> Option<&'a Value> {
        self.properties.and_then(|p| p.get(name))
    }

    fn property_f64(&self, name: &str) -> Option<f64> {
        self.property(name).and_then(Value::as_f64)
    }

    /// `[lon, lat, depth]`, each `None` when absent.
    fn coordinates(&self) -> [Option<f64>; 3] {
        let coords = self
            .geometry
            .and_then(|g| g.get("coordinates"))
            .and_then(Value::as_array);
        let at = |i: usize| coords.and_then(|c| c.get(i)).and_then(Value::as_f64);
        [at(0), at(1), at(2)]
    }
}
