//! Reservation CRD
//!
//! Claims node capacity on behalf of workloads that have not been created yet.
//! The scheduler places a reservation like a pod; once bound, the owners named
//! in `spec.owners` may consume the reserved resources.

use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::references::{ReservationObjectReference, ReservationOwner};

/// Condition reason set on a failed reservation whose expiration passed
pub const REASON_RESERVATION_EXPIRED: &str = "Expired";

/// Condition type recording whether the reservation was scheduled
pub const CONDITION_RESERVATION_SCHEDULED: &str = "Scheduled";

/// Condition type recording whether the reservation is ready for consumption
pub const CONDITION_RESERVATION_READY: &str = "Ready";

/// ReservationSpec defines the desired state of a reservation
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "scheduling.microscaler.io",
    version = "v1alpha1",
    kind = "Reservation",
    shortname = "rsv",
    status = "ReservationStatus",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSpec {
    /// Pod template describing the reserved resources and placement constraints
    /// Required; absent only on malformed objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "pod_template_schema")]
    pub template: Option<PodTemplateSpec>,

    /// Workloads allowed to consume this reservation (at least one required)
    #[serde(default)]
    pub owners: Vec<ReservationOwner>,

    /// Time to live measured from creation (e.g., "30m", "1h30m", "45s")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,

    /// Absolute expiration deadline, takes precedence over `ttl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<chrono::DateTime<chrono::Utc>>,
}

/// ReservationStatus defines the observed state of a reservation
///
/// Written by the reservation controller; the scheduler only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatus {
    /// Lifecycle phase, written by the reservation controller only
    #[serde(default)]
    pub phase: ReservationPhase,

    /// Observed conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ReservationCondition>,

    /// Workloads currently consuming the reservation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_owners: Vec<ReservationObjectReference>,

    /// Node the reservation is bound to (empty until scheduled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

/// Reservation lifecycle phase
///
/// Pending -> Available -> Succeeded | Failed. `Waiting` is an intermediate
/// state used while a reservation waits for its pre-allocated workloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ReservationPhase {
    /// Not yet scheduled to a node
    #[default]
    Pending,

    /// Scheduled and holding capacity on a node
    Available,

    /// Scheduled but waiting before it can be consumed
    Waiting,

    /// Consumed by its owners; capacity released
    Succeeded,

    /// Expired or otherwise failed; capacity released
    Failed,
}

/// Observed condition of a reservation (Kubernetes condition layout)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCondition {
    /// Condition type (e.g., "Scheduled", "Ready")
    #[serde(rename = "type")]
    pub type_: String,

    /// "True", "False" or "Unknown"
    pub status: String,

    /// Machine-readable reason (e.g., "Expired")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// When the condition last changed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<chrono::DateTime<chrono::Utc>>,
}

// PodTemplateSpec does not carry a schemars schema; keep the nested
// object opaque so the API server preserves every pod field.
fn pod_template_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "object",
        "x-kubernetes-preserve-unknown-fields": true
    })
}
