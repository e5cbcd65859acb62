//! Engine error type.

/// Errors raised by the pure computations.
///
/// The engine does not catch these itself; the HTTP boundary translates them
/// into a server error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A trip or pricing query reported zero seats, so no occupancy rate exists.
    #[error("Cannot compute occupancy: total seats is zero")]
    ZeroCapacity,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
