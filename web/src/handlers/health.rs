//! Liveness endpoint.
//!
//! Used by load balancers to verify the process is up. Readiness depends on
//! the database and lives with the application state in `routefare-server`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Liveness response body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Crate version of the running service.
    pub version: &'static str,
}

/// Simple health check endpoint (for basic liveness).
///
/// Does NOT check dependencies.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
