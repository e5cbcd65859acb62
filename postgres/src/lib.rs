//! `PostgreSQL` route repository for routefare.
//!
//! This crate implements the read-only [`RouteRepository`] trait from
//! `routefare-core` against the booking platform's relational schema:
//!
//! - `routes`: one row per route with distance, fares and operating costs
//! - `route_stops`: intermediate stops, ordered by `stop_order`
//! - `trips`: scheduled departures with their seat counts
//!
//! The tables are owned and migrated by the booking platform. Numeric money
//! columns may be `NUMERIC`; every query casts to `float8`.
//!
//! # Example
//!
//! ```ignore
//! use routefare_postgres::PostgresRouteRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = PostgresRouteRepository::connect("postgres://localhost/booking").await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use routefare_core::repository::{RepositoryError, RepositoryFuture, RouteRepository};
use routefare_core::{Route, RouteId, Stop, TripOccupancy};
use sqlx::PgPool;
use std::time::Instant;

type RouteRow = (f64, f64, Option<f64>, f64, f64);

/// `PgPool`-backed route repository.
#[derive(Clone, Debug)]
pub struct PostgresRouteRepository {
    pool: PgPool,
}

impl PostgresRouteRepository {
    /// Connect to `database_url` with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the connection fails.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Storage(format!("Failed to connect: {e}")))?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn load_route(&self, id: RouteId) -> Result<Option<Route>, RepositoryError> {
        let started = Instant::now();

        let row: Option<RouteRow> = sqlx::query_as(
            "SELECT distance_km::float8, base_price::float8, average_speed_kmh::float8,
                    COALESCE(fuel_cost_estimate, 0)::float8, COALESCE(toll_charges, 0)::float8
             FROM routes
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(format!("Failed to load route: {e}")))?;

        let Some((distance_km, base_price, average_speed_kmh, fuel, tolls)) = row else {
            tracing::debug!(route_id = %id, "Route not found");
            record_query("find_route", started);
            return Ok(None);
        };

        let stop_rows: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT arrival_offset_minutes, departure_offset_minutes
             FROM route_stops
             WHERE route_id = $1
             ORDER BY stop_order",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(format!("Failed to load stops: {e}")))?;

        let mut route = Route::new(id, distance_km, base_price)
            .with_costs(fuel, tolls)
            .with_stops(
                stop_rows
                    .into_iter()
                    .map(|(arrival, departure)| Stop::new(arrival, departure))
                    .collect(),
            );
        route.average_speed_kmh = average_speed_kmh;

        record_query("find_route", started);
        Ok(Some(route))
    }

    async fn load_trips(&self, id: RouteId) -> Result<Vec<TripOccupancy>, RepositoryError> {
        let started = Instant::now();

        let rows: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT total_seats, available_seats
             FROM trips
             WHERE route_id = $1",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(format!("Failed to load trips: {e}")))?;

        let trips = rows
            .into_iter()
            .map(|(total, available)| decode_trip(total, available))
            .collect::<Result<Vec<_>, _>>()?;

        record_query("trips_for_route", started);
        Ok(trips)
    }
}

fn decode_trip(total: i32, available: i32) -> Result<TripOccupancy, RepositoryError> {
    let total_seats = u32::try_from(total)
        .map_err(|_| RepositoryError::Decode(format!("negative total_seats: {total}")))?;
    let available_seats = u32::try_from(available)
        .map_err(|_| RepositoryError::Decode(format!("negative available_seats: {available}")))?;
    Ok(TripOccupancy::new(total_seats, available_seats))
}

fn record_query(query: &'static str, started: Instant) {
    metrics::histogram!("routefare_repository_query_duration_seconds", "query" => query)
        .record(started.elapsed().as_secs_f64());
}

impl RouteRepository for PostgresRouteRepository {
    fn find_route(&self, id: RouteId) -> RepositoryFuture<'_, Option<Route>> {
        Box::pin(self.load_route(id))
    }

    fn trips_for_route(&self, id: RouteId) -> RepositoryFuture<'_, Vec<TripOccupancy>> {
        Box::pin(self.load_trips(id))
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::Storage(format!("Database unreachable: {e}")))?;
            Ok(())
        })
    }
}
