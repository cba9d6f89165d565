//! Query-path error type with HTTP status code mapping.
//!
//! [`QuakeError`] is the central error type of the read path. Each variant
//! maps to an HTTP status code and a `{"detail": ...}` JSON body. Server
//! side failures are logged in full and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::storage::StorageError;

/// Detail sent for every 5xx response.
pub const INTERNAL_DETAIL: &str = "Internal Server Error";

/// Structured JSON error response body.
///
/// ```json
/// { "detail": "No data yet" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub detail: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant   | HTTP Status               |
/// |-----------|---------------------------|
/// | `NoData`  | 404 Not Found             |
/// | `Storage` | 500 Internal Server Error |
/// | `Decode`  | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum QuakeError {
    /// No snapshot of the requested kind exists yet.
    #[error("{0}")]
    NoData(&'static str),

    /// Blob store failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored snapshot does not have the expected shape.
    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QuakeError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoData(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients.
    #[must_use]
    pub fn public_detail(&self) -> String {
        match self {
            Self::NoData(detail) => (*detail).to_string(),
            _ => INTERNAL_DETAIL.to_string(),
        }
    }
}

impl IntoResponse for QuakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            detail: self.public_detail(),
        };
        (status, axum::Json(body)).into_response()
    }
}
