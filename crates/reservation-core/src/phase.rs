//! Phase classification
//!
//! A reservation holds real node capacity only when it is both logically
//! ready (`Available`) and physically placed (bound to a node). Everything
//! else, including an `Available` reservation without a node, is inactive.

use crds::{Reservation, ReservationPhase, REASON_RESERVATION_EXPIRED};
use kube::ResourceExt;

fn phase(reservation: &Reservation) -> ReservationPhase {
    reservation
        .status
        .as_ref()
        .map(|status| status.phase)
        .unwrap_or_default()
}

/// Whether the reservation is available and bound to a node.
///
/// `None` is never active.
pub fn is_reservation_active<'a>(reservation: impl Into<Option<&'a Reservation>>) -> bool {
    reservation.into().is_some_and(|r| {
        phase(r) == ReservationPhase::Available && reservation_node_name(r).is_some()
    })
}

/// Whether the reservation has been consumed by its owners
pub fn is_reservation_succeeded<'a>(reservation: impl Into<Option<&'a Reservation>>) -> bool {
    reservation
        .into()
        .is_some_and(|r| phase(r) == ReservationPhase::Succeeded)
}

/// Whether the reservation failed, for any reason including expiry
pub fn is_reservation_failed<'a>(reservation: impl Into<Option<&'a Reservation>>) -> bool {
    reservation
        .into()
        .is_some_and(|r| phase(r) == ReservationPhase::Failed)
}

/// Whether the reservation failed because its expiration passed
pub fn is_reservation_expired<'a>(reservation: impl Into<Option<&'a Reservation>>) -> bool {
    reservation.into().is_some_and(|r| {
        phase(r) == ReservationPhase::Failed
            && r.status.as_ref().is_some_and(|status| {
                status
                    .conditions
                    .iter()
                    .any(|c| c.reason.as_deref() == Some(REASON_RESERVATION_EXPIRED))
            })
    })
}

/// Node the reservation is bound to, `None` while unbound
pub fn reservation_node_name(reservation: &Reservation) -> Option<&str> {
    reservation
        .status
        .as_ref()
        .and_then(|status| status.node_name.as_deref())
        .filter(|name| !name.is_empty())
}

/// Prefix of keys for reservations that have no UID yet.
///
/// `:` is not allowed in Kubernetes object names, so no real pod can carry it.
pub const RESERVATION_KEY_PREFIX: &str = "reservation:";

/// Stable key identifying a reservation.
///
/// The UID once the API server assigned one, otherwise the name behind
/// [`RESERVATION_KEY_PREFIX`]. Also used as the reserve pod name.
pub fn reservation_key(reservation: &Reservation) -> String {
    reservation
        .uid()
        .filter(|uid| !uid.is_empty())
        .unwrap_or_else(|| format!("{RESERVATION_KEY_PREFIX}{}", reservation.name_any()))
}
