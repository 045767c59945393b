//! Cluster defaults used when a reservation leaves a field empty.

use crds::Reservation;
use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReservationError;
use crate::reserve_pod::build_reserve_pod;
use crate::scheduler_name::scheduler_name_or;

/// Scheduler name assumed when a pod template does not request one
pub const DEFAULT_SCHEDULER_NAME: &str = "default-scheduler";

/// Namespace given to reserve pods whose template has none
pub const DEFAULT_NAMESPACE: &str = "default";

/// Cluster-level defaults for reservation handling
///
/// ```yaml
/// defaultSchedulerName: batch-scheduler
/// defaultNamespace: reservations
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationConfig {
    /// Scheduler name used when the template does not set one
    pub default_scheduler_name: String,

    /// Namespace used for reserve pods when the template does not set one
    pub default_namespace: String,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            default_scheduler_name: DEFAULT_SCHEDULER_NAME.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl ReservationConfig {
    /// Parse configuration from a YAML document.
    ///
    /// Missing keys keep their defaults; an empty document yields the defaults.
    pub fn from_yaml(document: &str) -> Result<Self, ReservationError> {
        if document.trim().is_empty() {
            debug!("Empty reservation configuration, using defaults");
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce unschedulable reserve pods
    pub fn validate(&self) -> Result<(), ReservationError> {
        if self.default_scheduler_name.trim().is_empty() {
            return Err(ReservationError::InvalidConfig(
                "defaultSchedulerName must not be empty".to_string(),
            ));
        }
        if self.default_namespace.trim().is_empty() {
            return Err(ReservationError::InvalidConfig(
                "defaultNamespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Scheduler name requested by the reservation, or the configured default
    pub fn scheduler_name<'a>(&'a self, reservation: impl Into<Option<&'a Reservation>>) -> &'a str {
        scheduler_name_or(reservation.into(), &self.default_scheduler_name)
    }

    /// Project a reservation into a reserve pod using the configured namespace
    pub fn new_reserve_pod(&self, reservation: &Reservation) -> Pod {
        build_reserve_pod(reservation, &self.default_namespace)
    }
}
