//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::handlers::{earthquakes, system};
use crate::domain::{CuratedEvent, MagnitudeBand, QuakeStats};
use crate::error::ErrorResponse;

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "quake-feed",
        description = "Latest USGS earthquake snapshots and aggregate statistics."
    ),
    paths(
        system::health_handler,
        earthquakes::latest_raw,
        earthquakes::summary,
        earthquakes::stats,
    ),
    components(schemas(
        CuratedEvent,
        MagnitudeBand,
        QuakeStats,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Earthquakes", description = "Stored feed snapshots"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, serving the document at
/// `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
