//! Axum integration for routefare.
//!
//! The engine in `routefare-core` is pure; this crate is the shell around it
//! that every HTTP surface shares:
//!
//! - [`AppError`]: engine and repository errors rendered as the failure envelope
//! - [`ApiResponse`]: the `{ success: true, data }` success envelope
//! - [`middleware`]: correlation ID propagation and request spans
//! - [`handlers`]: liveness
//!
//! # Example
//!
//! ```ignore
//! use routefare_web::{ApiResponse, AppError};
//! use axum::{extract::{Path, State}, Json};
//!
//! async fn emissions(
//!     State(state): State<AppState>,
//!     Path(route_id): Path<String>,
//! ) -> Result<ApiResponse<EmissionsEstimate>, AppError> {
//!     let route = state.load_route(&route_id).await?;
//!     Ok(ApiResponse::ok(estimate_emissions(&route, VehicleType::Standard)))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;

pub use error::AppError;
pub use middleware::{correlation_id_layer, CorrelationId, CORRELATION_ID_HEADER};
pub use response::ApiResponse;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
