//! # Routefare Client
//!
//! Calls the route analysis API and falls back to computing the answer
//! locally when the service cannot help.
//!
//! Fallback is taken when the request fails to send, the service answers with
//! a non-2xx status, or the envelope reports `success: false`. The local answer
//! comes from the same `routefare-core` functions the service runs, computed
//! over the route and trip snapshots the caller already holds.
//!
//! ## Example
//!
//! ```no_run
//! use routefare_client::{RouteAnalysisClient, Source};
//! use routefare_core::params::RawEmissionsParams;
//! use routefare_core::{Route, RouteId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RouteAnalysisClient::new("http://localhost:8080")?;
//! let route = Route::new(RouteId::new(), 350.0, 45.0);
//!
//! let params = RawEmissionsParams { vehicle_type: Some("vt-2".to_string()) };
//! let emissions = client.emissions(&route, &params).await?;
//! if emissions.source == Source::Fallback {
//!     tracing::warn!("analysis service unavailable, showing local estimate");
//! }
//! println!("{} kg CO2", emissions.data.co2_emissions);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use routefare_core::emissions::{estimate_emissions, EmissionsEstimate};
use routefare_core::occupancy::{route_occupancy, RouteOccupancy};
use routefare_core::params::{RawEmissionsParams, RawPriceParams, RawTravelTimeParams};
use routefare_core::pricing::{calculate_dynamic_price, DynamicPrice};
use routefare_core::travel_time::{estimate_travel_time, TravelTimeEstimate};
use routefare_core::{EngineError, PricingEnvironment, Route, RouteId, TripOccupancy};
use routefare_web::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where an analysis result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Answered by the analysis service
    Remote,
    /// Computed locally because the service could not answer
    Fallback,
}

/// An analysis result and its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<T> {
    /// The result
    pub data: T,
    /// Where it came from
    pub source: Source,
}

impl<T> Analysis<T> {
    const fn remote(data: T) -> Self {
        Self {
            data,
            source: Source::Remote,
        }
    }

    const fn fallback(data: T) -> Self {
        Self {
            data,
            source: Source::Fallback,
        }
    }
}

/// Errors that leave the client with no answer at all.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    /// The service was unavailable and local computation failed too
    #[error("Local computation failed: {0}")]
    Engine(#[from] EngineError),
}

/// Client for the route analysis API.
#[derive(Debug, Clone)]
pub struct RouteAnalysisClient {
    http: reqwest::Client,
    base_url: String,
    environment: PricingEnvironment,
}

impl RouteAnalysisClient {
    /// Create a client for the service at `base_url` with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::from_client(http, base_url))
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn from_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            environment: PricingEnvironment::system(),
        }
    }

    /// Use `environment` for locally computed prices.
    #[must_use]
    pub fn with_environment(mut self, environment: PricingEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Mean occupancy of `route`; `trips` feed the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Engine`] if the fallback is needed and a trip
    /// has zero seats.
    pub async fn occupancy(
        &self,
        route: &Route,
        trips: &[TripOccupancy],
    ) -> Result<Analysis<RouteOccupancy>, ClientError> {
        if let Some(data) = self.fetch(route.id, "occupancy", &()).await {
            return Ok(Analysis::remote(data));
        }
        Ok(Analysis::fallback(route_occupancy(trips)?))
    }

    /// Travel time of `route` under `params`.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other operations.
    pub async fn travel_time(
        &self,
        route: &Route,
        params: &RawTravelTimeParams,
    ) -> Result<Analysis<TravelTimeEstimate>, ClientError> {
        if let Some(data) = self.fetch(route.id, "travel-time", params).await {
            return Ok(Analysis::remote(data));
        }
        Ok(Analysis::fallback(estimate_travel_time(route, &params.resolve())))
    }

    /// Emissions of `route` for the vehicle in `params`.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other operations.
    pub async fn emissions(
        &self,
        route: &Route,
        params: &RawEmissionsParams,
    ) -> Result<Analysis<EmissionsEstimate>, ClientError> {
        if let Some(data) = self.fetch(route.id, "emissions", params).await {
            return Ok(Analysis::remote(data));
        }
        Ok(Analysis::fallback(estimate_emissions(route, params.resolve())))
    }

    /// Dynamic fare of `route` under `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Engine`] if the fallback is needed and
    /// `totalSeats` resolves to zero.
    pub async fn dynamic_price(
        &self,
        route: &Route,
        params: &RawPriceParams,
    ) -> Result<Analysis<DynamicPrice>, ClientError> {
        if let Some(data) = self.fetch(route.id, "dynamic-price", params).await {
            return Ok(Analysis::remote(data));
        }
        let price = calculate_dynamic_price(
            route,
            &params.resolve(),
            self.environment.clock.now(),
            &*self.environment.holidays,
        )?;
        Ok(Analysis::fallback(price))
    }

    /// GET one analysis endpoint; `None` whenever the fallback should run.
    async fn fetch<T, Q>(&self, route_id: RouteId, endpoint: &str, query: &Q) -> Option<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}/api/routes/{route_id}/{endpoint}", self.base_url);

        let response = match self.http.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%url, %error, "Analysis service unreachable, computing locally");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "Analysis service returned an error, computing locally");
            return None;
        }

        match response.json::<ApiResponse<T>>().await {
            Ok(envelope) => {
                let message = envelope.message.clone();
                let data = envelope.into_data();
                if data.is_none() {
                    tracing::warn!(%url, ?message, "Analysis service reported failure, computing locally");
                }
                data
            }
            Err(error) => {
                tracing::warn!(%url, %error, "Malformed analysis response, computing locally");
                None
            }
        }
    }
}
