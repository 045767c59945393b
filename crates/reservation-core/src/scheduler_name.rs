//! Scheduler name resolution for reservations.

use crds::Reservation;

use crate::config::DEFAULT_SCHEDULER_NAME;

/// Scheduler the reservation's pod template asks for.
///
/// Falls back to [`DEFAULT_SCHEDULER_NAME`] when the reservation, its
/// template, the template's pod spec or the name itself is missing.
pub fn reservation_scheduler_name<'a>(reservation: impl Into<Option<&'a Reservation>>) -> &'a str {
    scheduler_name_or(reservation.into(), DEFAULT_SCHEDULER_NAME)
}

pub(crate) fn scheduler_name_or<'a>(reservation: Option<&'a Reservation>, default: &'a str) -> &'a str {
    reservation
        .and_then(|r| r.spec.template.as_ref())
        .and_then(|template| template.spec.as_ref())
        .and_then(|spec| spec.scheduler_name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(default)
}
