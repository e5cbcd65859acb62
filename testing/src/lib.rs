//! # Routefare Testing
//!
//! Testing utilities and fixtures for routefare.
//!
//! This crate provides:
//! - [`FixedClock`]: deterministic time for pricing tests
//! - [`InMemoryRouteRepository`]: `HashMap`-backed route storage
//! - [`fixtures`]: ready-made routes and trips
//!
//! ## Example
//!
//! ```
//! use routefare_testing::{fixtures, test_clock, InMemoryRouteRepository};
//! use routefare_core::Clock;
//!
//! let repository = InMemoryRouteRepository::new();
//! let route = fixtures::intercity_route();
//! repository.insert_route(route.clone());
//!
//! assert_eq!(repository.len(), 1);
//! assert_eq!(test_clock().now(), test_clock().now());
//! ```

use chrono::{DateTime, Utc};
use routefare_core::environment::Clock;

mod repository_mocks;

pub use repository_mocks::{FailingRouteRepository, InMemoryRouteRepository};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use routefare_testing::mocks::FixedClock;
    /// use routefare_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (Monday 2025-06-09 10:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-09T10:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Ready-made domain values for tests.
pub mod fixtures {
    use routefare_core::{Route, RouteId, Stop, TripOccupancy};

    /// 350 km coach route priced at 45 with 10 fuel and 5 tolls, no stops.
    #[must_use]
    pub fn intercity_route() -> Route {
        Route::new(RouteId::new(), 350.0, 45.0).with_costs(10.0, 5.0)
    }

    /// 120 km regional route at 80 km/h with two 15-minute stops.
    #[must_use]
    pub fn regional_route() -> Route {
        Route::new(RouteId::new(), 120.0, 18.0)
            .with_average_speed(80.0)
            .with_costs(6.0, 0.0)
            .with_stops(vec![Stop::new(30, 45), Stop::new(70, 85)])
    }

    /// Two trips whose per-trip rates average to 25%.
    #[must_use]
    pub fn mixed_trips() -> Vec<TripOccupancy> {
        vec![TripOccupancy::new(100, 50), TripOccupancy::new(50, 50)]
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_clock_is_a_monday() {
        use chrono::{Datelike, Weekday};
        assert_eq!(test_clock().now().weekday(), Weekday::Mon);
    }
}
