//! HTTP API handlers.

pub mod analysis;
