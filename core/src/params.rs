//! Lenient resolution of raw query parameters.
//!
//! Callers hand us whatever arrived on the query string. Missing, unparseable
//! and non-finite values resolve to the documented defaults instead of failing, so
//! none of these functions return errors.

use crate::pricing::PriceQuery;
use crate::travel_time::TravelConditions;
use crate::types::{VehicleType, WeatherCondition};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default seats still for sale when the caller does not say.
pub const DEFAULT_AVAILABLE_SEATS: u32 = 20;
/// Default vehicle capacity when the caller does not say.
pub const DEFAULT_TOTAL_SEATS: u32 = 40;
/// Default traffic multiplier.
pub const DEFAULT_TRAFFIC_FACTOR: f64 = 1.0;

/// Parse a float, falling back to `default` for missing, malformed, NaN or
/// infinite input.
#[must_use]
pub fn float_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Parse a seat count, falling back to `default` for missing, malformed,
/// negative or out-of-range input. Fractional counts are truncated.
#[must_use]
pub fn seats_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map_or(default, |v| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above
            let seats = v.trunc() as u32;
            seats
        })
}

/// Parse an ISO calendar date (`YYYY-MM-DD`). Full RFC 3339 timestamps are
/// accepted and reduced to their date.
#[must_use]
pub fn date_or_none(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Query string of `GET /routes/{id}/travel-time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTravelTimeParams {
    /// Traffic multiplier as sent by the caller
    pub traffic_factor: Option<String>,
    /// Weather key as sent by the caller
    pub weather_conditions: Option<String>,
}

impl RawTravelTimeParams {
    /// Resolve to typed conditions, applying defaults.
    #[must_use]
    pub fn resolve(&self) -> TravelConditions {
        TravelConditions {
            traffic_factor: float_or(self.traffic_factor.as_deref(), DEFAULT_TRAFFIC_FACTOR),
            weather: self
                .weather_conditions
                .as_deref()
                .map(WeatherCondition::from_key)
                .unwrap_or_default(),
        }
    }
}

/// Query string of `GET /routes/{id}/emissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmissionsParams {
    /// Vehicle key as sent by the caller
    pub vehicle_type: Option<String>,
}

impl RawEmissionsParams {
    /// Resolve the vehicle class, applying the default.
    #[must_use]
    pub fn resolve(&self) -> VehicleType {
        self.vehicle_type
            .as_deref()
            .map(VehicleType::from_key)
            .unwrap_or_default()
    }
}

/// Query string of `GET /routes/{id}/dynamic-price`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceParams {
    /// Trip date as sent by the caller
    pub date: Option<String>,
    /// Seats still for sale as sent by the caller
    pub available_seats: Option<String>,
    /// Vehicle capacity as sent by the caller
    pub total_seats: Option<String>,
}

impl RawPriceParams {
    /// Resolve to a typed pricing query, applying defaults.
    #[must_use]
    pub fn resolve(&self) -> PriceQuery {
        PriceQuery {
            trip_date: date_or_none(self.date.as_deref()),
            available_seats: seats_or(self.available_seats.as_deref(), DEFAULT_AVAILABLE_SEATS),
            total_seats: seats_or(self.total_seats.as_deref(), DEFAULT_TOTAL_SEATS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_fall_back_on_garbage_and_nan() {
        assert!((float_or(Some("1.4"), 1.0) - 1.4).abs() < f64::EPSILON);
        assert!((float_or(Some("NaN"), 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((float_or(Some("fast"), 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((float_or(None, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn floats_fall_back_on_infinities() {
        for raw in ["inf", "infinity", "-inf", "1e400", "-1e400"] {
            assert!(
                (float_or(Some(raw), 1.0) - 1.0).abs() < f64::EPSILON,
                "{raw} should resolve to the default"
            );
        }
    }

    #[test]
    fn seats_fall_back_on_garbage_and_negatives() {
        assert_eq!(seats_or(Some("5"), 20), 5);
        assert_eq!(seats_or(Some("7.9"), 20), 7);
        assert_eq!(seats_or(Some("-3"), 20), 20);
        assert_eq!(seats_or(Some("lots"), 20), 20);
        assert_eq!(seats_or(Some("NaN"), 40), 40);
        assert_eq!(seats_or(None, 40), 40);
        assert_eq!(seats_or(Some("0"), 40), 0);
    }

    #[test]
    fn dates_accept_iso_and_rfc3339() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 14);
        assert_eq!(date_or_none(Some("2025-06-14")), expected);
        assert_eq!(date_or_none(Some("2025-06-14T09:30:00Z")), expected);
        assert_eq!(date_or_none(Some("14/06/2025")), None);
        assert_eq!(date_or_none(None), None);
    }

    #[test]
    fn price_params_resolve_with_defaults() {
        let query = RawPriceParams::default().resolve();
        assert_eq!(query.trip_date, None);
        assert_eq!(query.available_seats, DEFAULT_AVAILABLE_SEATS);
        assert_eq!(query.total_seats, DEFAULT_TOTAL_SEATS);
    }

    #[test]
    fn travel_params_resolve_unknown_weather_to_clear() {
        let raw = RawTravelTimeParams {
            traffic_factor: Some("abc".to_string()),
            weather_conditions: Some("sandstorm".to_string()),
        };
        let conditions = raw.resolve();
        assert!((conditions.traffic_factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(conditions.weather, WeatherCondition::Clear);
    }

    #[test]
    fn emissions_params_accept_frontend_keys() {
        let raw = RawEmissionsParams {
            vehicle_type: Some("vt-3".to_string()),
        };
        assert_eq!(raw.resolve(), VehicleType::Mini);
        assert_eq!(RawEmissionsParams::default().resolve(), VehicleType::Standard);
    }
}
