//! Prometheus metrics for the analysis endpoints.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `routefare_analysis_requests_total{endpoint}` - Analysis requests served
//! - `routefare_analysis_errors_total{endpoint}` - Analysis requests that failed
//!
//! ## Histograms
//! - `routefare_analysis_duration_seconds{endpoint}` - Handler latency
//! - `routefare_repository_query_duration_seconds{query}` - Database query latency
//!
//! Recording is a no-op until [`install_recorder`] has run, so tests and
//! library users pay nothing for it.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use routefare_web::AppError;
use std::future::Future;
use std::time::Instant;
use thiserror::Error;

/// Errors from metrics setup.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Register metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "routefare_analysis_requests_total",
        "Total number of analysis requests by endpoint"
    );
    describe_counter!(
        "routefare_analysis_errors_total",
        "Total number of failed analysis requests by endpoint"
    );
    describe_histogram!(
        "routefare_analysis_duration_seconds",
        "Time taken to serve an analysis request"
    );
    describe_histogram!(
        "routefare_repository_query_duration_seconds",
        "Time taken by route repository queries"
    );
}

/// Install the global Prometheus recorder.
///
/// The returned handle renders the text exposition served on `/metrics`.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

/// Run one analysis request, recording count, latency and failure.
///
/// # Errors
///
/// Returns whatever error `request` produced, unchanged.
pub async fn track<T, F>(endpoint: &'static str, request: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    let started = Instant::now();
    counter!("routefare_analysis_requests_total", "endpoint" => endpoint).increment(1);

    let result = request.await;

    histogram!("routefare_analysis_duration_seconds", "endpoint" => endpoint)
        .record(started.elapsed().as_secs_f64());
    if let Err(error) = &result {
        counter!("routefare_analysis_errors_total", "endpoint" => endpoint).increment(1);
        tracing::debug!(endpoint, status = %error.status(), "Analysis request failed");
    }

    result
}
