//! Reservation validity gate
//!
//! Filter and score plugins walk heterogeneous object caches on every
//! scheduling cycle. [`is_obj_valid_active_reservation`] is the one check
//! they run before counting an object's resources as reserved.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use crds::Reservation;
use kube::core::DynamicObject;
use kube::{Resource, ResourceExt};
use tracing::trace;

use crate::error::ReservationError;
use crate::phase::is_reservation_active;

/// Check that the reservation carries a template, owners and an expiration.
///
/// Reports the first missing field in that order. Only presence is checked;
/// see [`reservation_expiration`](crate::reservation_expiration) for parsing.
pub fn validate_reservation(reservation: &Reservation) -> Result<(), ReservationError> {
    if reservation.spec.template.is_none() {
        return Err(ReservationError::MissingTemplate(reservation.name_any()));
    }
    if reservation.spec.owners.is_empty() {
        return Err(ReservationError::MissingOwners(reservation.name_any()));
    }
    if reservation.spec.ttl.is_none() && reservation.spec.expires.is_none() {
        return Err(ReservationError::MissingExpiration(reservation.name_any()));
    }
    Ok(())
}

/// Whether `obj` is a well-formed reservation currently holding capacity.
///
/// Accepts a [`Reservation`], an `Arc<Reservation>` as stored by reflectors,
/// or a [`DynamicObject`] of the Reservation kind. Boxed candidates
/// (`Box<Reservation>`, `Box<dyn Any>`) are unwrapped, so passing `&boxed`
/// and `&*boxed` give the same answer. Any other type, `None`, a structurally
/// invalid reservation and an inactive one all yield `false`.
///
/// ```
/// use std::any::Any;
/// use reservation_core::is_obj_valid_active_reservation;
///
/// let mut cache: Vec<Box<dyn Any>> = Vec::new();
/// cache.push(Box::new(42_u32));
/// cache.push(Box::new("web-0"));
/// assert!(cache.iter().all(|obj| !is_obj_valid_active_reservation(Some(obj))));
/// ```
pub fn is_obj_valid_active_reservation(obj: Option<&dyn Any>) -> bool {
    let Some(reservation) = obj.and_then(as_reservation) else {
        return false;
    };
    if let Err(err) = validate_reservation(&reservation) {
        trace!(error = %err, "Skipping invalid reservation");
        return false;
    }
    is_reservation_active(&*reservation)
}

fn as_reservation(obj: &dyn Any) -> Option<Cow<'_, Reservation>> {
    if let Some(reservation) = obj.downcast_ref::<Reservation>() {
        return Some(Cow::Borrowed(reservation));
    }
    if let Some(reservation) = obj.downcast_ref::<Arc<Reservation>>() {
        return Some(Cow::Borrowed(reservation.as_ref()));
    }
    if let Some(reservation) = obj.downcast_ref::<Box<Reservation>>() {
        return Some(Cow::Borrowed(reservation.as_ref()));
    }
    // A `&Box<dyn Any>` coerces to `&dyn Any` of the box itself
    if let Some(inner) = obj.downcast_ref::<Box<dyn Any>>() {
        return as_reservation(&**inner);
    }
    if let Some(inner) = obj.downcast_ref::<Box<dyn Any + Send + Sync>>() {
        return as_reservation(&**inner);
    }

    let dynamic = obj.downcast_ref::<DynamicObject>()?;
    let types = dynamic.types.as_ref()?;
    if types.api_version != Reservation::api_version(&()) || types.kind != Reservation::kind(&()) {
        return None;
    }
    match dynamic.clone().try_parse::<Reservation>() {
        Ok(reservation) => Some(Cow::Owned(reservation)),
        Err(err) => {
            trace!(name = %dynamic.name_any(), error = %err, "Dynamic object is not a valid Reservation");
            None
        }
    }
}
