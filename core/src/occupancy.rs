//! Route occupancy aggregate.
//!
//! The route rate is the arithmetic mean of per-trip rates. Every trip counts
//! once regardless of its capacity, so a half-full 100-seat coach and an empty
//! 50-seat minibus average to 25%, not 33%.

use crate::error::{EngineError, Result};
use crate::round_to;
use crate::types::TripOccupancy;
use serde::{Deserialize, Serialize};

/// Occupancy summary for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOccupancy {
    /// Mean per-trip occupancy, percent with one decimal
    pub occupancy_rate: f64,
    /// Number of trips averaged
    pub total_trips: usize,
}

impl RouteOccupancy {
    /// Summary for a route with no trips.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            occupancy_rate: 0.0,
            total_trips: 0,
        }
    }
}

/// Occupied share of a single trip, as a percentage.
///
/// # Errors
///
/// Returns [`EngineError::ZeroCapacity`] if the trip has no seats.
pub fn trip_occupancy_percent(trip: &TripOccupancy) -> Result<f64> {
    if trip.total_seats == 0 {
        return Err(EngineError::ZeroCapacity);
    }
    let total = f64::from(trip.total_seats);
    let occupied = total - f64::from(trip.available_seats);
    Ok(occupied / total * 100.0)
}

/// Mean occupancy across the trips of a route.
///
/// # Errors
///
/// Returns [`EngineError::ZeroCapacity`] if any trip has no seats.
pub fn route_occupancy(trips: &[TripOccupancy]) -> Result<RouteOccupancy> {
    if trips.is_empty() {
        return Ok(RouteOccupancy::empty());
    }

    let sum = trips
        .iter()
        .map(trip_occupancy_percent)
        .sum::<Result<f64>>()?;

    #[allow(clippy::cast_precision_loss)] // trip counts are far below 2^52
    let mean = sum / trips.len() as f64;

    Ok(RouteOccupancy {
        occupancy_rate: round_to(mean, 1),
        total_trips: trips.len(),
    })
}
