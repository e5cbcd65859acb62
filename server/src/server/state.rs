//! Application state for the route analysis HTTP server.

use metrics_exporter_prometheus::PrometheusHandle;
use routefare_core::{PricingEnvironment, Route, RouteId, RouteRepository};
use routefare_web::AppError;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; every field is an `Arc` or a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Route and trip lookup
    pub repository: Arc<dyn RouteRepository>,

    /// Clock and holiday calendar handed to the pricing engine
    pub environment: PricingEnvironment,

    /// Prometheus handle, present when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state without metrics.
    #[must_use]
    pub fn new(repository: Arc<dyn RouteRepository>, environment: PricingEnvironment) -> Self {
        Self {
            repository,
            environment,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Resolve a raw path segment to a stored route.
    ///
    /// # Errors
    ///
    /// - [`AppError`] 404 if the id is not a UUID or no route has it
    /// - [`AppError`] 500 if the repository fails
    pub async fn load_route(&self, raw_id: &str) -> Result<Route, AppError> {
        let Ok(id) = raw_id.parse::<RouteId>() else {
            tracing::debug!(route_id = raw_id, "Unparseable route id");
            return Err(AppError::not_found("Route", raw_id));
        };

        self.repository
            .find_route(id)
            .await?
            .ok_or_else(|| AppError::not_found("Route", raw_id))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.environment)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
