//! Reservation error types.
//!
//! The scheduling predicates never fail; these errors are only returned by
//! the structural validation, expiration and configuration APIs.

use thiserror::Error;

/// Errors describing malformed reservations or configuration.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Reservation has no pod template
    #[error("Reservation {0} misses the template spec")]
    MissingTemplate(String),

    /// Reservation names no owners
    #[error("Reservation {0} misses the owner spec")]
    MissingOwners(String),

    /// Reservation has neither a TTL nor an expiration deadline
    #[error("Reservation {0} misses the expiration spec")]
    MissingExpiration(String),

    /// TTL is present but cannot be parsed as a duration
    #[error("Invalid reservation TTL: {0:?}")]
    InvalidTtl(String),

    /// Configuration document could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
