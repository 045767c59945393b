//! Scheduling CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for node capacity reservations.

pub mod references;
pub mod reservation;

pub use references::*;
pub use reservation::*;
