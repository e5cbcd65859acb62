//! CO2 emission estimates.

use crate::round_to;
use crate::types::{Route, VehicleType};
use serde::{Deserialize, Serialize};

/// Emission factor in kg CO2 per kilometre.
#[must_use]
pub const fn emission_factor(vehicle: VehicleType) -> f64 {
    match vehicle {
        VehicleType::Standard => 0.68,
        VehicleType::Luxury => 0.85,
        VehicleType::Mini => 0.45,
    }
}

/// Emissions for one run of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsEstimate {
    /// kg CO2, two decimals
    pub co2_emissions: f64,
    /// Route length in kilometres
    pub distance_km: f64,
    /// Vehicle class used
    pub vehicle_type: VehicleType,
    /// kg CO2 per kilometre used
    pub emission_factor: f64,
}

/// Estimate CO2 emitted by `vehicle` driving the whole route.
#[must_use]
pub fn estimate_emissions(route: &Route, vehicle: VehicleType) -> EmissionsEstimate {
    let factor = emission_factor(vehicle);
    EmissionsEstimate {
        co2_emissions: round_to(route.distance_km * factor, 2),
        distance_km: route.distance_km,
        vehicle_type: vehicle,
        emission_factor: factor,
    }
}
