//! Readiness and metrics endpoints.
//!
//! Liveness comes from `routefare_web::handlers::health_check`.

use super::state::AppState;
use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};
use routefare_web::AppError;
use serde::Serialize;

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Database connectivity
    pub database: bool,
}

/// Readiness check endpoint.
///
/// Returns 200 OK when the route repository answers a ping, 503 otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/ready
/// # {"ready":true,"database":true}
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.repository.ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "Readiness check failed");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready: database,
            database,
        }),
    )
}

/// Prometheus text exposition.
///
/// # Errors
///
/// Returns 503 if the recorder is not installed.
#[allow(clippy::unused_async)]
pub async fn render_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Metrics recorder not installed"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
