//! HTTP handlers shared by routefare services.

pub mod health;

pub use health::{health_check, HealthResponse};
