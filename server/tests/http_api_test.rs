//! HTTP API tests for the route analysis endpoints.
//!
//! Drives the full router (middleware included) with `tower::ServiceExt::oneshot`
//! against an in-memory repository and a frozen clock.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use routefare_core::repository::RepositoryFuture;
use routefare_core::{
    FixedHolidayCalendar, NoHolidays, PricingEnvironment, Route, RouteId, RouteRepository,
    TripOccupancy,
};
use routefare_server::{build_router, AppState};
use routefare_testing::{fixtures, test_clock, FailingRouteRepository, InMemoryRouteRepository};
use routefare_web::CORRELATION_ID_HEADER;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn app_with(repository: InMemoryRouteRepository) -> Router {
    let environment = PricingEnvironment::new(Arc::new(test_clock()), Arc::new(NoHolidays));
    build_router(AppState::new(Arc::new(repository), environment), TIMEOUT)
}

fn seeded() -> (Router, Route, Route) {
    let repository = InMemoryRouteRepository::new();
    let intercity = fixtures::intercity_route();
    let regional = fixtures::regional_route();
    repository.insert_route(intercity.clone());
    repository.insert_route(regional.clone());
    for trip in fixtures::mixed_trips() {
        repository.insert_trip(intercity.id, trip);
    }
    (app_with(repository), intercity, regional)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    assert!(
        response.headers().contains_key(CORRELATION_ID_HEADER),
        "every response carries a correlation id"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn number(value: &Value) -> f64 {
    value.as_f64().expect("expected a number")
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = number(actual);
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Occupancy
// ============================================================================

#[tokio::test]
async fn occupancy_averages_per_trip_rates() {
    let (app, intercity, _) = seeded();
    let (status, body) = get(app, &format!("/api/routes/{}/occupancy", intercity.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_close(&body["data"]["occupancyRate"], 25.0);
    assert_eq!(body["data"]["totalTrips"], 2);
}

#[tokio::test]
async fn occupancy_of_route_without_trips_is_zero() {
    let (app, _, regional) = seeded();
    let (status, body) = get(app, &format!("/api/routes/{}/occupancy", regional.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["occupancyRate"], 0.0);
    assert_eq!(body["data"]["totalTrips"], 0);
}

#[tokio::test]
async fn occupancy_with_zero_seat_trip_is_server_error() {
    let repository = InMemoryRouteRepository::new();
    let route = fixtures::intercity_route();
    repository.insert_route(route.clone());
    repository.insert_trip(route.id, TripOccupancy::new(0, 0));

    let (status, body) = get(app_with(repository), &format!("/api/routes/{}/occupancy", route.id)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

// ============================================================================
// Travel time
// ============================================================================

#[tokio::test]
async fn travel_time_defaults() {
    let (app, intercity, _) = seeded();
    let (status, body) = get(app, &format!("/api/routes/{}/travel-time", intercity.id)).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_close(&data["travelTimeHours"], 5.83);
    assert_close(&data["baseTravelTimeHours"], 5.83);
    assert_close(&data["stopTimeHours"], 0.0);
    assert_close(&data["trafficFactor"], 1.0);
    assert_eq!(data["weatherConditions"], "clear");
    assert_close(&data["weatherMultiplier"], 1.0);
}

#[tokio::test]
async fn travel_time_with_traffic_fog_and_stops() {
    let (app, _, regional) = seeded();
    let uri = format!(
        "/api/routes/{}/travel-time?trafficFactor=1.2&weatherConditions=fog",
        regional.id
    );
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_close(&data["baseTravelTimeHours"], 2.25);
    assert_close(&data["stopTimeHours"], 0.5);
    assert_close(&data["travelTimeHours"], 2.75);
    assert_eq!(data["weatherConditions"], "fog");
    assert_close(&data["weatherMultiplier"], 1.25);
}

#[tokio::test]
async fn travel_time_garbage_params_fall_back_to_defaults() {
    let (app, intercity, _) = seeded();
    let uri = format!(
        "/api/routes/{}/travel-time?trafficFactor=NaN&weatherConditions=sandstorm",
        intercity.id
    );
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["trafficFactor"], 1.0);
    assert_eq!(body["data"]["weatherConditions"], "clear");
}

#[tokio::test]
async fn travel_time_infinite_traffic_factor_uses_default() {
    let (app, intercity, _) = seeded();

    for raw in ["inf", "infinity", "-inf", "1e400"] {
        let uri = format!("/api/routes/{}/travel-time?trafficFactor={raw}", intercity.id);
        let (status, body) = get(app.clone(), &uri).await;

        assert_eq!(status, StatusCode::OK, "{raw}");
        assert_close(&body["data"]["trafficFactor"], 1.0);
        assert_close(&body["data"]["travelTimeHours"], 5.83);
    }
}

// ============================================================================
// Emissions
// ============================================================================

#[tokio::test]
async fn emissions_for_luxury_coach() {
    let (app, intercity, _) = seeded();
    let uri = format!("/api/routes/{}/emissions?vehicleType=vt-2", intercity.id);
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["co2Emissions"], 297.5);
    assert_close(&body["data"]["distanceKm"], 350.0);
    assert_eq!(body["data"]["vehicleType"], "luxury");
}

#[tokio::test]
async fn emissions_unknown_vehicle_uses_standard() {
    let (app, intercity, _) = seeded();
    let uri = format!("/api/routes/{}/emissions?vehicleType=vt-99", intercity.id);
    let (_, body) = get(app, &uri).await;

    assert_eq!(body["data"]["vehicleType"], "standard");
    assert_close(&body["data"]["emissionFactor"], 0.68);
}

// ============================================================================
// Dynamic price
// ============================================================================

#[tokio::test]
async fn dynamic_price_weekend_high_demand() {
    let (app, intercity, _) = seeded();
    let uri = format!(
        "/api/routes/{}/dynamic-price?date=2025-06-14&availableSeats=5&totalSeats=40",
        intercity.id
    );
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_close(&data["basePrice"], 45.0);
    assert_close(&data["dynamicPrice"], 62.1);
    assert_eq!(data["factors"]["isWeekend"], true);
    assert_eq!(data["factors"]["isHoliday"], false);
    assert_close(&data["factors"]["occupancyRate"], 87.5);
    assert_eq!(data["factors"]["daysAdvance"], 5);
    assert_close(&data["factors"]["operationalCost"], 15.0);
    assert_close(&data["factors"]["minPrice"], 18.75);
}

#[tokio::test]
async fn dynamic_price_without_date_pays_late_surcharge() {
    let (app, intercity, _) = seeded();
    let (status, body) = get(app, &format!("/api/routes/{}/dynamic-price", intercity.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["dynamicPrice"], 58.5);
    assert_eq!(body["data"]["factors"]["daysAdvance"], 0);
}

#[tokio::test]
async fn dynamic_price_uses_configured_holidays() {
    let repository = InMemoryRouteRepository::new();
    let route = fixtures::intercity_route();
    repository.insert_route(route.clone());
    let holidays = FixedHolidayCalendar::new([NaiveDate::from_ymd_opt(2025, 6, 19).unwrap()]);
    let environment = PricingEnvironment::new(Arc::new(test_clock()), Arc::new(holidays));
    let app = build_router(AppState::new(Arc::new(repository), environment), TIMEOUT);

    let uri = format!(
        "/api/routes/{}/dynamic-price?date=2025-06-19&availableSeats=20&totalSeats=40",
        route.id
    );
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["factors"]["isHoliday"], true);
    assert_eq!(body["data"]["factors"]["isWeekend"], false);
    assert_close(&body["data"]["dynamicPrice"], 56.25);
}

#[tokio::test]
async fn dynamic_price_zero_capacity_is_server_error() {
    let (app, intercity, _) = seeded();
    let uri = format!("/api/routes/{}/dynamic-price?totalSeats=0", intercity.id);
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn dynamic_price_is_idempotent_with_frozen_clock() {
    let (app, intercity, _) = seeded();
    let uri = format!(
        "/api/routes/{}/dynamic-price?date=2025-07-30&availableSeats=31",
        intercity.id
    );
    let (_, first) = get(app.clone(), &uri).await;
    let (_, second) = get(app, &uri).await;

    assert_eq!(first, second);
}

// ============================================================================
// Errors and operational endpoints
// ============================================================================

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _, _) = seeded();
    let id = RouteId::new();

    for endpoint in ["occupancy", "travel-time", "emissions", "dynamic-price"] {
        let (status, body) = get(app.clone(), &format!("/api/routes/{id}/{endpoint}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{endpoint}");
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn unparseable_route_id_is_not_found() {
    let (app, _, _) = seeded();
    let (status, body) = get(app, "/api/routes/not-a-uuid/emissions").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route with id not-a-uuid not found");
}

#[tokio::test]
async fn repository_failure_is_server_error() {
    let environment = PricingEnvironment::new(Arc::new(test_clock()), Arc::new(NoHolidays));
    let app = build_router(
        AppState::new(Arc::new(FailingRouteRepository::new("connection reset")), environment),
        TIMEOUT,
    );
    let id = RouteId::new();

    let (status, body) = get(app.clone(), &format!("/api/routes/{id}/occupancy")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().contains("connection reset"));

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
}

/// Repository whose lookups never finish in time.
struct StalledRouteRepository;

impl RouteRepository for StalledRouteRepository {
    fn find_route(&self, _id: RouteId) -> RepositoryFuture<'_, Option<Route>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(None)
        })
    }

    fn trips_for_route(&self, _id: RouteId) -> RepositoryFuture<'_, Vec<TripOccupancy>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

#[tokio::test]
async fn slow_request_times_out_with_failure_envelope() {
    let environment = PricingEnvironment::new(Arc::new(test_clock()), Arc::new(NoHolidays));
    let app = build_router(
        AppState::new(Arc::new(StalledRouteRepository), environment),
        Duration::from_millis(50),
    );
    let id = RouteId::new();

    let (status, body) = get(app, &format!("/api/routes/{id}/emissions")).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "REQUEST_TIMEOUT");
}

#[tokio::test]
async fn health_and_ready() {
    let (app, _, _) = seeded();

    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn metrics_unavailable_without_recorder() {
    let (app, _, _) = seeded();
    let (status, body) = get(app, "/metrics").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn unknown_path_still_carries_correlation_id() {
    let (app, _, _) = seeded();
    let (status, body) = get(app, "/api/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
