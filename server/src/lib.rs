//! # Routefare Server
//!
//! HTTP service answering route analysis questions for the booking platform:
//! occupancy, travel time, emissions and dynamic pricing.
//!
//! Routes and trips are read through a [`RouteRepository`](routefare_core::RouteRepository)
//! (`PostgreSQL` in production); all computation happens in `routefare-core`.
//!
//! ## Example
//!
//! ```ignore
//! use routefare_server::{build_router, AppState, Config};
//!
//! let config = Config::from_env();
//! let state = AppState::new(repository, PricingEnvironment::system());
//! let app = build_router(state, config.request_timeout());
//! axum::serve(listener, app).await?;
//! ```

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;

pub use config::Config;
pub use server::{build_router, AppState};
