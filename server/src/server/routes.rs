//! Router configuration for the route analysis service.

use super::health::{readiness_check, render_metrics};
use super::state::AppState;
use crate::api::analysis;
use axum::http::{StatusCode, Uri};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use routefare_web::{correlation_id_layer, AppError};
use routefare_web::handlers::health_check;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// - `/health`, `/ready`, `/metrics`
/// - the four analysis endpoints under `/api/routes/:route_id/`
///
/// Every response, including timeouts and unknown paths, carries the
/// `X-Correlation-ID` header. Requests running longer than `request_timeout`
/// are answered with a 408 failure envelope.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/routes/:route_id/occupancy", get(analysis::get_occupancy))
        .route("/routes/:route_id/travel-time", get(analysis::get_travel_time))
        .route("/routes/:route_id/emissions", get(analysis::get_emissions))
        .route(
            "/routes/:route_id/dynamic-price",
            get(analysis::get_dynamic_price),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(render_metrics))
        .nest("/api", api_routes)
        .fallback(unknown_endpoint)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(timeout_envelope))
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
}

#[allow(clippy::unused_async)]
async fn unknown_endpoint(uri: Uri) -> AppError {
    AppError::new(
        StatusCode::NOT_FOUND,
        format!("No endpoint at {}", uri.path()),
        "NOT_FOUND".to_string(),
    )
}

/// The timeout layer answers with an empty body; give it the failure envelope.
#[allow(clippy::unused_async)]
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::timeout("Request timed out").into_response()
    } else {
        response
    }
}
