//! Reservation scheduling core
//!
//! Pure functions that let the scheduler account for [`Reservation`]s the
//! same way it accounts for pods:
//!
//! - **Classification**: [`is_reservation_active`] and friends read the
//!   phase and bound node written by the reservation controller.
//! - **Scheduler name**: [`reservation_scheduler_name`] resolves the
//!   scheduler the reservation template asks for.
//! - **Projection**: [`new_reserve_pod`] turns a reservation into a reserve
//!   pod carrying a marker annotation; [`is_reserve_pod`] recognises it.
//! - **Validity gate**: [`is_obj_valid_active_reservation`] checks an
//!   arbitrary object from a heterogeneous cache before its resources are
//!   counted.
//!
//! # Example
//!
//! ```
//! use reservation_core::{is_reserve_pod, new_reserve_pod, reservation_scheduler_name};
//! use crds::{Reservation, ReservationSpec};
//!
//! let reservation = Reservation::new("reserve-web", ReservationSpec::default());
//! assert_eq!(reservation_scheduler_name(&reservation), "default-scheduler");
//!
//! let pod = new_reserve_pod(&reservation);
//! assert!(is_reserve_pod(&pod));
//! ```
//!
//! Every function takes an immutable snapshot and holds no state, so callers
//! may share reservations across threads freely.
//!
//! [`Reservation`]: crds::Reservation

pub mod config;
pub mod error;
pub mod expiration;
pub mod owner;
pub mod phase;
pub mod reserve_pod;
pub mod scheduler_name;
pub mod validate;
#[cfg(test)]
mod test_utils;

pub use config::{ReservationConfig, DEFAULT_NAMESPACE, DEFAULT_SCHEDULER_NAME};
pub use error::ReservationError;
pub use expiration::{reservation_expiration, Expiration};
pub use owner::match_reservation_owners;
pub use phase::{
    is_reservation_active, is_reservation_expired, is_reservation_failed,
    is_reservation_succeeded, reservation_key, reservation_node_name, RESERVATION_KEY_PREFIX,
};
pub use reserve_pod::{
    is_reserve_pod, new_reserve_pod, reserve_pod_node_name, reserve_pod_reservation_name,
    ANNOTATION_RESERVATION_NAME, ANNOTATION_RESERVATION_NODE, ANNOTATION_RESERVE_POD,
};
pub use scheduler_name::reservation_scheduler_name;
pub use validate::{is_obj_valid_active_reservation, validate_reservation};
