//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use quake_feed::api;
use quake_feed::app_state::{AppState, HealthInfo};
use quake_feed::ingest::{FeedClient, Ingestor};
use quake_feed::service::SnapshotService;
use quake_feed::storage::BlobStore;

/// Feed with three features of magnitudes 1.0, 5.0 and null.
pub fn three_quake_feed() -> Value {
    json!({
        "type": "FeatureCollection",
        "metadata": { "generated": 1_764_732_600_000_i64, "title": "USGS All Earthquakes, Past Hour" },
        "features": [
            {
                "type": "Feature",
                "id": "nc75012345",
                "properties": { "mag": 1.0, "place": "5 km NW of The Geysers, CA", "time": 1_764_732_000_000_i64 },
                "geometry": { "type": "Point", "coordinates": [-122.4, 37.7, 10.2] }
            },
            {
                "type": "Feature",
                "id": "us7000abcd",
                "properties": { "mag": 5.0, "place": "South of the Fiji Islands", "time": 1_764_731_000_000_i64 },
                "geometry": { "type": "Point", "coordinates": [178.1, -24.3, 550.0] }
            },
            {
                "type": "Feature",
                "id": "ak0251xyz",
                "properties": { "mag": null, "place": null, "time": 1_764_730_000_000_i64 },
                "geometry": null
            }
        ]
    })
}

/// Compact JSON encoding of `value`, as an upstream would serve it.
pub fn body_of(value: &Value) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Fixed run timestamp.
pub fn run_at(minute: u32) -> DateTime<Utc> {
    let Some(t) = Utc.with_ymd_and_hms(2025, 12, 3, 3, minute, 0).single() else {
        panic!("valid timestamp");
    };
    t
}

/// Feed client pointing at `url`.
pub fn feed_client(url: &str) -> FeedClient {
    let Ok(client) = FeedClient::new(url, Duration::from_secs(2)) else {
        panic!("feed client should build");
    };
    client
}

/// Ingestor over `store` whose feed is never contacted.
pub fn offline_ingestor(store: Arc<dyn BlobStore>) -> Ingestor {
    Ingestor::new(store, feed_client("http://127.0.0.1:9/unused"))
}

/// Full application router over `store`.
pub fn app(store: Arc<dyn BlobStore>) -> Router {
    api::build_app(AppState {
        snapshot_service: Arc::new(SnapshotService::new(store)),
        health: Arc::new(HealthInfo {
            quakes_bucket: "quakes-test".to_string(),
            usgs_feed_url: "https://earthquake.usgs.gov/feed.geojson".to_string(),
        }),
    })
}

/// Issues `GET uri` and returns status plus raw body bytes.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
        panic!("valid request");
    };
    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("router is infallible");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should be readable");
    };
    (status, bytes.to_vec())
}

/// Issues `GET uri` and parses the body as JSON.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, uri).await;
    let Ok(value) = serde_json::from_slice(&bytes) else {
        panic!("body of {uri} is not json");
    };
    (status, value)
}
