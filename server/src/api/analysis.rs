//! Route analysis endpoints.
//!
//! - GET /api/routes/:route_id/occupancy
//! - GET /api/routes/:route_id/travel-time?trafficFactor=&weatherConditions=
//! - GET /api/routes/:route_id/emissions?vehicleType=
//! - GET /api/routes/:route_id/dynamic-price?date=&availableSeats=&totalSeats=
//!
//! Every endpoint looks the route up first (404 if missing), resolves its query
//! string leniently, runs the engine and wraps the result in the success
//! envelope.

use crate::metrics::track;
use crate::server::state::AppState;
use axum::extract::{Path, Query, State};
use routefare_core::emissions::{estimate_emissions, EmissionsEstimate};
use routefare_core::occupancy::{route_occupancy, RouteOccupancy};
use routefare_core::params::{RawEmissionsParams, RawPriceParams, RawTravelTimeParams};
use routefare_core::pricing::{calculate_dynamic_price, DynamicPrice};
use routefare_core::travel_time::{estimate_travel_time, TravelTimeEstimate};
use routefare_web::{ApiResponse, AppError};

/// Mean occupancy across the route's trips.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/api/routes/550e8400-e29b-41d4-a716-446655440000/occupancy
/// # {"success":true,"data":{"occupancyRate":25.0,"totalTrips":2}}
/// ```
///
/// # Errors
///
/// 404 for an unknown route, 500 for a repository failure or a zero-seat trip.
pub async fn get_occupancy(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<ApiResponse<RouteOccupancy>, AppError> {
    track("occupancy", async {
        let route = state.load_route(&route_id).await?;
        let trips = state.repository.trips_for_route(route.id).await?;
        let occupancy = route_occupancy(&trips)?;
        tracing::debug!(%route.id, trips = trips.len(), rate = occupancy.occupancy_rate, "Occupancy computed");
        Ok(ApiResponse::ok(occupancy))
    })
    .await
}

/// Travel time under traffic and weather conditions.
///
/// # Errors
///
/// 404 for an unknown route, 500 for a repository failure.
pub async fn get_travel_time(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(params): Query<RawTravelTimeParams>,
) -> Result<ApiResponse<TravelTimeEstimate>, AppError> {
    track("travel_time", async {
        let route = state.load_route(&route_id).await?;
        let conditions = params.resolve();
        Ok(ApiResponse::ok(estimate_travel_time(&route, &conditions)))
    })
    .await
}

/// CO₂ estimate for a vehicle class.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:8080/api/routes/550e8400-e29b-41d4-a716-446655440000/emissions?vehicleType=vt-2'
/// # {"success":true,"data":{"co2Emissions":297.5,"distanceKm":350.0,"vehicleType":"luxury","emissionFactor":0.85}}
/// ```
///
/// # Errors
///
/// 404 for an unknown route, 500 for a repository failure.
pub async fn get_emissions(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(params): Query<RawEmissionsParams>,
) -> Result<ApiResponse<EmissionsEstimate>, AppError> {
    track("emissions", async {
        let route = state.load_route(&route_id).await?;
        Ok(ApiResponse::ok(estimate_emissions(&route, params.resolve())))
    })
    .await
}

/// Dynamic fare for a trip date and seat availability.
///
/// # Errors
///
/// 404 for an unknown route, 500 for a repository failure or `totalSeats=0`.
pub async fn get_dynamic_price(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(params): Query<RawPriceParams>,
) -> Result<ApiResponse<DynamicPrice>, AppError> {
    track("dynamic_price", async {
        let route = state.load_route(&route_id).await?;
        let query = params.resolve();
        let now = state.environment.clock.now();
        let price = calculate_dynamic_price(&route, &query, now, &*state.environment.holidays)?;
        tracing::debug!(
            %route.id,
            base = price.base_price,
            dynamic = price.dynamic_price,
            days_advance = price.factors.days_advance,
            "Dynamic price computed"
        );
        Ok(ApiResponse::ok(price))
    })
    .await
}
