//! Travel time estimation.
//!
//! Driving time is `distance / speed`, scaled by traffic and then weather.
//! Dwell time at intermediate stops is added afterwards and is never scaled.

use crate::round_to;
use crate::types::{Route, Stop, WeatherCondition};
use serde::{Deserialize, Serialize};

/// Slowdown applied to driving time for each weather condition.
#[must_use]
pub const fn weather_multiplier(weather: WeatherCondition) -> f64 {
    match weather {
        WeatherCondition::Clear => 1.0,
        WeatherCondition::LightRain => 1.15,
        WeatherCondition::HeavyRain => 1.35,
        WeatherCondition::Fog => 1.25,
        WeatherCondition::Storm => 1.50,
    }
}

/// Road conditions for a travel-time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelConditions {
    /// Multiplier for congestion (1.0 = free flow)
    pub traffic_factor: f64,
    /// Weather along the route
    pub weather: WeatherCondition,
}

impl Default for TravelConditions {
    fn default() -> Self {
        Self {
            traffic_factor: crate::params::DEFAULT_TRAFFIC_FACTOR,
            weather: WeatherCondition::Clear,
        }
    }
}

/// Travel time breakdown, hours rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTimeEstimate {
    /// Driving time plus dwell time
    pub travel_time_hours: f64,
    /// Driving time after traffic and weather adjustment
    pub base_travel_time_hours: f64,
    /// Dwell time at intermediate stops
    pub stop_time_hours: f64,
    /// Traffic multiplier that was applied
    pub traffic_factor: f64,
    /// Weather that was applied
    pub weather_conditions: WeatherCondition,
    /// Weather multiplier that was applied
    pub weather_multiplier: f64,
}

/// Total dwell time at intermediate stops, in hours.
#[must_use]
pub fn stop_time_hours(route: &Route) -> f64 {
    let minutes: i64 = route
        .intermediate_stops
        .iter()
        .map(Stop::dwell_minutes)
        .sum();

    #[allow(clippy::cast_precision_loss)] // dwell minutes are tiny
    let minutes = minutes as f64;
    minutes / 60.0
}

/// Estimate the end-to-end travel time of a route.
#[must_use]
pub fn estimate_travel_time(route: &Route, conditions: &TravelConditions) -> TravelTimeEstimate {
    let multiplier = weather_multiplier(conditions.weather);

    let mut base = route.distance_km / route.effective_speed_kmh();
    base *= conditions.traffic_factor;
    base *= multiplier;

    let stops = stop_time_hours(route);

    TravelTimeEstimate {
        travel_time_hours: round_to(base + stops, 2),
        base_travel_time_hours: round_to(base, 2),
        stop_time_hours: round_to(stops, 2),
        traffic_factor: conditions.traffic_factor,
        weather_conditions: conditions.weather,
        weather_multiplier: multiplier,
    }
}
