//! Owner references for Reservation CRDs
//!
//! Describes which workloads may consume a reservation. An owner is matched
//! either against the workload itself, against its controlling object, or
//! against its labels.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a single object (usually a Pod)
///
/// Follows the Kubernetes `ObjectReference` pattern. When `uid` is set it is
/// authoritative; otherwise `namespace` and `name` identify the object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationObjectReference {
    /// API version of the referenced object (e.g., "v1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the referenced object (e.g., "Pod")
    #[serde(default)]
    pub kind: String,

    /// Name of the referenced object
    #[serde(default)]
    pub name: String,

    /// Namespace of the referenced object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// UID of the referenced object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl ReservationObjectReference {
    /// Create a new reference with kind and name (no namespace)
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Create a new reference with kind, name, and namespace
    pub fn with_namespace(kind: &str, name: &str, namespace: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Self::new(kind, name)
        }
    }

    /// Helper to create a reference to a Pod
    pub fn pod(namespace: &str, name: &str) -> Self {
        Self {
            api_version: Some("v1".to_string()),
            ..Self::with_namespace("Pod", name, namespace)
        }
    }
}

/// Reference to the controller (ReplicaSet, StatefulSet, Job, ...) owning a workload
///
/// Matched against the `controller: true` entry of a Pod's `ownerReferences`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationControllerReference {
    /// API version of the controller (e.g., "apps/v1")
    #[serde(default)]
    pub api_version: String,

    /// Kind of the controller (e.g., "ReplicaSet")
    #[serde(default)]
    pub kind: String,

    /// Name of the controller
    #[serde(default)]
    pub name: String,

    /// UID of the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Namespace of the controller (workloads must live in the same namespace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Label selector restricted to exact label matches
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationLabelSelector {
    /// Labels that must all be present with the given values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

/// A workload allowed to consume a reservation
///
/// Only one field is expected to be set. This struct uses optional fields
/// instead of an enum to keep the CRD schema structural.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationOwner {
    /// Matches one specific object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ReservationObjectReference>,

    /// Matches every workload controlled by this controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ReservationControllerReference>,

    /// Matches every workload carrying these labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<ReservationLabelSelector>,
}

impl ReservationOwner {
    /// Owner matching a single object
    pub fn object(reference: ReservationObjectReference) -> Self {
        Self {
            object: Some(reference),
            ..Default::default()
        }
    }

    /// Owner matching workloads of a controller
    pub fn controller(reference: ReservationControllerReference) -> Self {
        Self {
            controller: Some(reference),
            ..Default::default()
        }
    }

    /// Owner matching workloads by labels
    pub fn labels(match_labels: BTreeMap<String, String>) -> Self {
        Self {
            label_selector: Some(ReservationLabelSelector { match_labels }),
            ..Default::default()
        }
    }
}
