//! Dynamic fare calculation.
//!
//! The fare starts at the route's base price and is multiplied, in this exact
//! order, by:
//!
//! 1. the weekend surcharge (Saturday or Sunday),
//! 2. the holiday surcharge (per the injected [`HolidayCalendar`]),
//! 3. one demand band (high, elevated or low occupancy),
//! 4. one advance-booking band (early-bird or late booking).
//!
//! The result is then floored at operational cost plus a 25% margin. Each
//! step multiplies the running total, so reordering them changes the fare.

use crate::environment::HolidayCalendar;
use crate::error::{EngineError, Result};
use crate::params::{DEFAULT_AVAILABLE_SEATS, DEFAULT_TOTAL_SEATS};
use crate::round_to;
use crate::types::Route;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Weekend surcharge multiplier.
pub const WEEKEND_MULTIPLIER: f64 = 1.15;
/// Holiday surcharge multiplier.
pub const HOLIDAY_MULTIPLIER: f64 = 1.25;
/// Multiplier when occupancy is above [`HIGH_DEMAND_THRESHOLD`].
pub const HIGH_DEMAND_MULTIPLIER: f64 = 1.20;
/// Multiplier when occupancy is above [`ELEVATED_DEMAND_THRESHOLD`].
pub const ELEVATED_DEMAND_MULTIPLIER: f64 = 1.10;
/// Multiplier when occupancy is below [`LOW_DEMAND_THRESHOLD`].
pub const LOW_DEMAND_MULTIPLIER: f64 = 0.90;
/// Occupancy fraction above which high demand pricing applies.
pub const HIGH_DEMAND_THRESHOLD: f64 = 0.8;
/// Occupancy fraction above which elevated demand pricing applies.
pub const ELEVATED_DEMAND_THRESHOLD: f64 = 0.6;
/// Occupancy fraction below which the low demand discount applies.
pub const LOW_DEMAND_THRESHOLD: f64 = 0.3;
/// Early-bird discount multiplier.
pub const EARLY_BIRD_MULTIPLIER: f64 = 0.85;
/// Late booking surcharge multiplier.
pub const LATE_BOOKING_MULTIPLIER: f64 = 1.30;
/// Bookings more than this many days ahead get the early-bird discount.
pub const EARLY_BIRD_DAYS: i64 = 14;
/// Bookings fewer than this many days ahead pay the late surcharge.
pub const LATE_BOOKING_DAYS: i64 = 2;
/// Margin over operational cost that the fare may never drop below.
pub const COST_FLOOR_MARGIN: f64 = 1.25;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Inputs of a price request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    /// Travel date; `None` means "now"
    pub trip_date: Option<NaiveDate>,
    /// Seats still for sale
    pub available_seats: u32,
    /// Vehicle capacity
    pub total_seats: u32,
}

impl Default for PriceQuery {
    fn default() -> Self {
        Self {
            trip_date: None,
            available_seats: DEFAULT_AVAILABLE_SEATS,
            total_seats: DEFAULT_TOTAL_SEATS,
        }
    }
}

/// Factors that went into a dynamic price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFactors {
    /// Trip falls on Saturday or Sunday
    pub is_weekend: bool,
    /// Trip falls on a calendar holiday
    pub is_holiday: bool,
    /// Sold share of seats, percent with one decimal
    pub occupancy_rate: f64,
    /// Whole days between now and the trip, rounded up
    pub days_advance: i64,
    /// Fuel plus tolls, two decimals
    pub operational_cost: f64,
    /// Price floor, two decimals
    pub min_price: f64,
}

/// A computed fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicPrice {
    /// Published fare of the route
    pub base_price: f64,
    /// Adjusted fare, two decimals
    pub dynamic_price: f64,
    /// Breakdown of the adjustment
    pub factors: PriceFactors,
}

/// Demand band for an occupancy fraction.
///
/// Bands are checked high first and the bounds are strict, so exactly 0.8,
/// 0.6 and 0.3 fall through to the next band.
#[must_use]
pub fn demand_multiplier(occupancy: f64) -> f64 {
    if occupancy > HIGH_DEMAND_THRESHOLD {
        HIGH_DEMAND_MULTIPLIER
    } else if occupancy > ELEVATED_DEMAND_THRESHOLD {
        ELEVATED_DEMAND_MULTIPLIER
    } else if occupancy < LOW_DEMAND_THRESHOLD {
        LOW_DEMAND_MULTIPLIER
    } else {
        1.0
    }
}

/// Advance-booking band for a day count.
#[must_use]
pub const fn advance_multiplier(days_advance: i64) -> f64 {
    if days_advance > EARLY_BIRD_DAYS {
        EARLY_BIRD_MULTIPLIER
    } else if days_advance < LATE_BOOKING_DAYS {
        LATE_BOOKING_MULTIPLIER
    } else {
        1.0
    }
}

/// Days from `now` until `trip`, rounded up.
#[must_use]
pub fn days_until(trip: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    #[allow(clippy::cast_precision_loss)] // millisecond spans of a few years
    let days = (trip - now).num_milliseconds() as f64 / MILLIS_PER_DAY;

    #[allow(clippy::cast_possible_truncation)] // already integral after ceil
    let days = days.ceil() as i64;
    days
}

/// Whether `date` is a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Compute the fare for `route` under `query`.
///
/// The trip instant is midnight UTC of `query.trip_date`, or `now` when no
/// date was given.
///
/// # Errors
///
/// Returns [`EngineError::ZeroCapacity`] if `query.total_seats` is zero.
pub fn calculate_dynamic_price(
    route: &Route,
    query: &PriceQuery,
    now: DateTime<Utc>,
    holidays: &dyn HolidayCalendar,
) -> Result<DynamicPrice> {
    if query.total_seats == 0 {
        return Err(EngineError::ZeroCapacity);
    }

    let trip_instant = query
        .trip_date
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(now, |midnight| midnight.and_utc());
    let trip_date = trip_instant.date_naive();

    let mut price = route.base_price;

    let weekend = is_weekend(trip_date);
    if weekend {
        price *= WEEKEND_MULTIPLIER;
    }

    let holiday = holidays.is_holiday(trip_date);
    if holiday {
        price *= HOLIDAY_MULTIPLIER;
    }

    let occupancy =
        1.0 - f64::from(query.available_seats) / f64::from(query.total_seats);
    price *= demand_multiplier(occupancy);

    let days_advance = days_until(trip_instant, now);
    price *= advance_multiplier(days_advance);

    let operational_cost = route.operational_cost();
    let min_price = operational_cost * COST_FLOOR_MARGIN;
    let final_price = price.max(min_price);

    Ok(DynamicPrice {
        base_price: route.base_price,
        dynamic_price: round_to(final_price, 2),
        factors: PriceFactors {
            is_weekend: weekend,
            is_holiday: holiday,
            occupancy_rate: round_to(occupancy * 100.0, 1),
            days_advance,
            operational_cost: round_to(operational_cost, 2),
            min_price: round_to(min_price, 2),
        },
    })
}
