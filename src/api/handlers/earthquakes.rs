//! Earthquake snapshot handlers: latest raw feed, curated summary, stats.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::app_state::AppState;
use crate::domain::{CuratedEvent, QuakeStats};
use crate::error::{ErrorResponse, QuakeError};
use crate::storage::JSON_CONTENT_TYPE;

/// 404 detail when no raw snapshot exists.
pub const NO_RAW_DATA: &str = "No data yet";

/// 404 detail when no curated snapshot exists.
pub const NO_CURATED_DATA: &str = "No curated data yet";

/// `GET /earthquakes/latest` — Latest raw feed payload, served with the
/// exact bytes stored at ingestion.
///
/// # Errors
///
/// Returns [`QuakeError::NoData`] if nothing has been ingested yet.
#[utoipa::path(
    get,
    path = "/earthquakes/latest",
    tag = "Earthquakes",
    summary = "Latest raw feed",
    description = "Returns the most recently stored upstream GeoJSON payload as fetched.",
    responses(
        (status = 200, description = "Raw feed payload", body = serde_json::Value),
        (status = 404, description = "No data yet", body = ErrorResponse),
    )
)]
pub async fn latest_raw(State(state): State<AppState>) -> Result<impl IntoResponse, QuakeError> {
    let body = state
        .snapshot_service
        .latest_raw()
        .await?
        .ok_or(QuakeError::NoData(NO_RAW_DATA))?;
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body))
}

/// `GET /earthquakes/summary` — Latest curated snapshot.
///
/// # Errors
///
/// Returns [`QuakeError::NoData`] if no curated snapshot exists.
#[utoipa::path(
    get,
    path = "/earthquakes/summary",
    tag = "Earthquakes",
    summary = "Latest curated events",
    description = "Returns the most recent curated snapshot: one normalized row per feed feature, in feed order.",
    responses(
        (status = 200, description = "Curated events", body = Vec<CuratedEvent>),
        (status = 404, description = "No curated data yet", body = ErrorResponse),
    )
)]
pub async fn summary(State(state): State<AppState>) -> Result<Json<Value>, QuakeError> {
    state
        .snapshot_service
        .latest_curated()
        .await?
        .map(Json)
        .ok_or(QuakeError::NoData(NO_CURATED_DATA))
}

/// `GET /earthquakes/stats` — Aggregates over the latest curated snapshot.
///
/// # Errors
///
/// Returns [`QuakeError::NoData`] if no curated snapshot exists.
#[utoipa::path(
    get,
    path = "/earthquakes/stats",
    tag = "Earthquakes",
    summary = "Snapshot statistics",
    description = "Returns the event count, maximum magnitude and per-band counts of the latest curated snapshot.",
    responses(
        (status = 200, description = "Aggregated statistics", body = QuakeStats),
        (status = 404, description = "No curated data yet", body = ErrorResponse),
    )
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<QuakeStats>, QuakeError> {
    state
        .snapshot_service
        .stats()
        .await?
        .map(Json)
        .ok_or(QuakeError::NoData(NO_CURATED_DATA))
}

/// Earthquake routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/earthquakes/latest", get(latest_raw))
        .route("/earthquakes/summary", get(summary))
        .route("/earthquakes/stats", get(stats))
}
