//! Domain types consumed by the engine.
//!
//! Routes, stops and trip occupancy snapshots are owned by the booking
//! platform's data-access layer. The engine only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteId(Uuid);

impl RouteId {
    /// Creates a new random `RouteId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `RouteId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RouteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ============================================================================
// Route
// ============================================================================

/// Speed assumed when a route has no usable average speed.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 60.0;

/// An intermediate stop, expressed as offsets from the route's departure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Minutes after departure the bus arrives at the stop
    pub arrival_offset_minutes: i32,
    /// Minutes after departure the bus leaves the stop
    pub departure_offset_minutes: i32,
}

impl Stop {
    /// Create a stop from its arrival and departure offsets.
    #[must_use]
    pub const fn new(arrival_offset_minutes: i32, departure_offset_minutes: i32) -> Self {
        Self {
            arrival_offset_minutes,
            departure_offset_minutes,
        }
    }

    /// Minutes the bus dwells at this stop.
    #[must_use]
    pub fn dwell_minutes(&self) -> i64 {
        i64::from(self.departure_offset_minutes) - i64::from(self.arrival_offset_minutes)
    }
}

/// A bus route as seen by the pricing engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route identifier
    pub id: RouteId,
    /// Route length in kilometres
    pub distance_km: f64,
    /// Published fare before any adjustment
    pub base_price: f64,
    /// Average cruising speed; `None` or zero means "use the default"
    #[serde(default)]
    pub average_speed_kmh: Option<f64>,
    /// Estimated fuel cost of running the route once
    #[serde(default)]
    pub fuel_cost_estimate: f64,
    /// Toll charges incurred on the route
    #[serde(default)]
    pub toll_charges: f64,
    /// Intermediate stops in travel order
    #[serde(default)]
    pub intermediate_stops: Vec<Stop>,
}

impl Route {
    /// Create a route with no operational costs, stops or explicit speed.
    #[must_use]
    pub const fn new(id: RouteId, distance_km: f64, base_price: f64) -> Self {
        Self {
            id,
            distance_km,
            base_price,
            average_speed_kmh: None,
            fuel_cost_estimate: 0.0,
            toll_charges: 0.0,
            intermediate_stops: Vec::new(),
        }
    }

    /// Set the average speed.
    #[must_use]
    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = Some(kmh);
        self
    }

    /// Set fuel and toll costs.
    #[must_use]
    pub fn with_costs(mut self, fuel_cost_estimate: f64, toll_charges: f64) -> Self {
        self.fuel_cost_estimate = fuel_cost_estimate;
        self.toll_charges = toll_charges;
        self
    }

    /// Set the intermediate stops.
    #[must_use]
    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.intermediate_stops = stops;
        self
    }

    /// Average speed used for travel-time estimates.
    ///
    /// Absent, zero and NaN speeds fall back to [`DEFAULT_AVERAGE_SPEED_KMH`].
    #[must_use]
    pub fn effective_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
            .filter(|speed| *speed != 0.0 && !speed.is_nan())
            .unwrap_or(DEFAULT_AVERAGE_SPEED_KMH)
    }

    /// Fuel plus tolls for one run of the route.
    #[must_use]
    pub fn operational_cost(&self) -> f64 {
        self.fuel_cost_estimate + self.toll_charges
    }
}

// ============================================================================
// Trips
// ============================================================================

/// Seat occupancy of a single trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOccupancy {
    /// Seats on the vehicle
    pub total_seats: u32,
    /// Seats still for sale
    pub available_seats: u32,
}

impl TripOccupancy {
    /// Create an occupancy snapshot.
    #[must_use]
    pub const fn new(total_seats: u32, available_seats: u32) -> Self {
        Self {
            total_seats,
            available_seats,
        }
    }
}

// ============================================================================
// Vehicle classes and weather
// ============================================================================

/// Vehicle class used for emission factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Regular coach
    #[default]
    Standard,
    /// Premium coach
    Luxury,
    /// Minibus
    Mini,
}

impl VehicleType {
    /// Canonical key used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Luxury => "luxury",
            Self::Mini => "mini",
        }
    }

    /// Resolve a vehicle key, accepting both the canonical names and the
    /// booking frontend's `vt-N` identifiers.
    ///
    /// Unknown keys resolve to [`VehicleType::Standard`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "luxury" | "vt-2" => Self::Luxury,
            "mini" | "vt-3" => Self::Mini,
            _ => Self::Standard,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather reported along the route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// No weather impact
    #[default]
    Clear,
    /// Light rain
    LightRain,
    /// Heavy rain
    HeavyRain,
    /// Fog
    Fog,
    /// Storm
    Storm,
}

impl WeatherCondition {
    /// Canonical key used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::LightRain => "light_rain",
            Self::HeavyRain => "heavy_rain",
            Self::Fog => "fog",
            Self::Storm => "storm",
        }
    }

    /// Resolve a weather key. Unknown keys resolve to [`WeatherCondition::Clear`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "light_rain" => Self::LightRain,
            "heavy_rain" => Self::HeavyRain,
            "fog" => Self::Fog,
            "storm" => Self::Storm,
            _ => Self::Clear,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
