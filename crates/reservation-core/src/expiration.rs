//! Reservation expiration
//!
//! A reservation expires either at an absolute deadline (`spec.expires`) or
//! after a TTL measured from its creation (`spec.ttl`). The deadline wins
//! when both are set. Marking a reservation expired is the reservation
//! controller's job; this module only reads `spec`.

use chrono::{DateTime, TimeDelta, Utc};
use crds::Reservation;
use kube::ResourceExt;
use kube::core::Duration;
use tracing::debug;

use crate::error::ReservationError;

/// When a reservation stops being usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Fixed point in time
    At(DateTime<Utc>),
    /// Duration after the reservation was created
    AfterCreation(TimeDelta),
}

impl Expiration {
    /// Absolute deadline given the reservation's creation time
    pub fn deadline(&self, created: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Expiration::At(at) => at,
            Expiration::AfterCreation(ttl) => created + ttl,
        }
    }

    /// Whether the deadline has been reached at `now`
    pub fn has_passed(&self, created: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now >= self.deadline(created)
    }
}

/// Expiration declared by the reservation.
///
/// `Ok(None)` when neither `expires` nor `ttl` is set. A TTL that is present
/// but malformed is reported as [`ReservationError::InvalidTtl`].
pub fn reservation_expiration(reservation: &Reservation) -> Result<Option<Expiration>, ReservationError> {
    if let Some(expires) = reservation.spec.expires {
        return Ok(Some(Expiration::At(expires)));
    }
    let Some(ttl) = reservation.spec.ttl.as_deref() else {
        return Ok(None);
    };
    let ttl = parse_ttl(ttl).inspect_err(|err| {
        debug!(reservation = %reservation.name_any(), error = %err, "Unparseable reservation TTL");
    })?;
    Ok(Some(Expiration::AfterCreation(ttl)))
}

/// Longest TTL string accepted before parsing
const MAX_TTL_LEN: usize = 64;

/// Longest run of digits in one TTL component
const MAX_TTL_DIGITS: usize = 12;

/// Parse a Go-style duration such as `30m`, `1h30m`, `1.5h` or `90us`.
///
/// Parsing is delegated to [`kube::core::Duration`], the `metav1.Duration`
/// format. Negative, empty and out-of-range values are rejected up front.
fn parse_ttl(value: &str) -> Result<TimeDelta, ReservationError> {
    let invalid = || ReservationError::InvalidTtl(value.to_string());

    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_TTL_LEN || trimmed.contains('-') {
        return Err(invalid());
    }
    // Oversized components overflow std::time::Duration inside the parser
    if trimmed
        .split(|c: char| !c.is_ascii_digit())
        .any(|digits| digits.len() > MAX_TTL_DIGITS)
    {
        return Err(invalid());
    }

    let duration: Duration = trimmed.parse().map_err(|err| {
        debug!(ttl = value, error = %err, "TTL is not a valid duration");
        invalid()
    })?;
    TimeDelta::from_std(duration.into()).map_err(|_| invalid())
}
