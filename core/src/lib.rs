//! # Routefare Core
//!
//! Pure pricing and route-economics engine for bus routes.
//!
//! This crate is the functional core shared by the HTTP server and the
//! client-side fallback path. Every operation is a synchronous, stateless
//! function over externally-owned route and trip records:
//!
//! - [`occupancy::route_occupancy`]: mean per-trip occupancy for a route
//! - [`travel_time::estimate_travel_time`]: traffic/weather adjusted travel time
//! - [`emissions::estimate_emissions`]: CO2 estimate by vehicle class
//! - [`pricing::calculate_dynamic_price`]: demand and calendar driven fare
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - No hidden I/O: "now" and the holiday calendar are injected
//! - Lenient inputs: malformed query values resolve to documented defaults
//!
//! ## Example
//!
//! ```
//! use routefare_core::{Route, RouteId, VehicleType};
//! use routefare_core::emissions::estimate_emissions;
//!
//! let route = Route::new(RouteId::new(), 350.0, 45.0);
//! let estimate = estimate_emissions(&route, VehicleType::Luxury);
//! assert!((estimate.co2_emissions - 297.5).abs() < f64::EPSILON);
//! ```

#![forbid(unsafe_code)]

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};

pub mod emissions;
pub mod environment;
pub mod error;
pub mod occupancy;
pub mod params;
pub mod pricing;
pub mod repository;
pub mod travel_time;
pub mod types;

pub use environment::{
    Clock, FixedHolidayCalendar, HolidayCalendar, NoHolidays, PricingEnvironment, SystemClock,
};
pub use error::EngineError;
pub use repository::{RepositoryError, RouteRepository};
pub use types::{Route, RouteId, Stop, TripOccupancy, VehicleType, WeatherCondition};

/// Round `value` to `decimals` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_to_requested_precision() {
        assert!((round_to(62.099_999_999_999_994, 2) - 62.1).abs() < f64::EPSILON);
        assert!((round_to(87.549, 1) - 87.5).abs() < f64::EPSILON);
        assert!((round_to(0.125, 2) - 0.13).abs() < f64::EPSILON);
    }
}
