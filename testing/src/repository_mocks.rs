//! In-memory route repository for fast, deterministic tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use routefare_core::repository::{RepositoryError, RepositoryFuture, RouteRepository};
use routefare_core::{Route, RouteId, TripOccupancy};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory route repository.
///
/// # Example
///
/// ```
/// use routefare_testing::InMemoryRouteRepository;
/// use routefare_core::{RouteRepository, TripOccupancy};
/// use routefare_testing::fixtures;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = InMemoryRouteRepository::new();
/// let route = fixtures::intercity_route();
/// repository.insert_route(route.clone());
/// repository.insert_trip(route.id, TripOccupancy::new(40, 10));
///
/// assert_eq!(repository.find_route(route.id).await?, Some(route.clone()));
/// assert_eq!(repository.trips_for_route(route.id).await?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRouteRepository {
    routes: Arc<RwLock<HashMap<RouteId, Route>>>,
    trips: Arc<RwLock<HashMap<RouteId, Vec<TripOccupancy>>>>,
}

impl InMemoryRouteRepository {
    /// Create a new empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a route, replacing any route with the same id.
    pub fn insert_route(&self, route: Route) {
        self.routes.write().unwrap().insert(route.id, route);
    }

    /// Append a trip to a route.
    pub fn insert_trip(&self, route_id: RouteId, trip: TripOccupancy) {
        self.trips
            .write()
            .unwrap()
            .entry(route_id)
            .or_default()
            .push(trip);
    }

    /// Number of stored routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.read().unwrap().len()
    }

    /// Check if no routes are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.read().unwrap().is_empty()
    }
}

impl RouteRepository for InMemoryRouteRepository {
    fn find_route(&self, id: RouteId) -> RepositoryFuture<'_, Option<Route>> {
        let route = self.routes.read().unwrap().get(&id).cloned();
        Box::pin(async move { Ok(route) })
    }

    fn trips_for_route(&self, id: RouteId) -> RepositoryFuture<'_, Vec<TripOccupancy>> {
        let trips = self
            .trips
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Box::pin(async move { Ok(trips) })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Repository whose every call fails, for exercising error paths.
#[derive(Clone, Debug)]
pub struct FailingRouteRepository {
    message: String,
}

impl FailingRouteRepository {
    /// Create a repository failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> RepositoryError {
        RepositoryError::Storage(self.message.clone())
    }
}

impl RouteRepository for FailingRouteRepository {
    fn find_route(&self, _id: RouteId) -> RepositoryFuture<'_, Option<Route>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn trips_for_route(&self, _id: RouteId) -> RepositoryFuture<'_, Vec<TripOccupancy>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}
