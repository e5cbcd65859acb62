//! Read-only access to routes and their trips.
//!
//! Storage is owned by the booking platform. The HTTP layer loads records
//! through this trait and hands them to the pure engine functions.

use crate::types::{Route, RouteId, TripOccupancy};
use std::future::Future;
use std::pin::Pin;

/// Errors from the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored row could not be turned into a domain value
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Boxed future returned by [`RouteRepository`] methods.
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Lookup of routes and trip occupancy snapshots.
///
/// Object safe so the server can hold an `Arc<dyn RouteRepository>`.
pub trait RouteRepository: Send + Sync {
    /// Load a route with its intermediate stops.
    ///
    /// Returns `Ok(None)` if no route has this id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the backend fails.
    fn find_route(&self, id: RouteId) -> RepositoryFuture<'_, Option<Route>>;

    /// Load the occupancy snapshot of every trip on a route.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the backend fails.
    fn trips_for_route(&self, id: RouteId) -> RepositoryFuture<'_, Vec<TripOccupancy>>;

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the backend cannot be reached.
    fn ping(&self) -> RepositoryFuture<'_, ()>;
}
