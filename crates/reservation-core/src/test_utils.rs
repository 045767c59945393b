//! Test utilities for unit testing reservation handling
//!
//! This module provides helpers for creating test reservations and pods.

use crds::{
    Reservation, ReservationObjectReference, ReservationOwner, ReservationPhase, ReservationSpec,
    ReservationStatus,
};
use k8s_openapi::api::core::v1::{Pod, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Helper to create a structurally valid, pending Reservation
///
/// The template pins `test-node-0`, one Pod owner is set and the TTL is 30m.
pub fn create_test_reservation(name: &str) -> Reservation {
    Reservation::new(
        name,
        ReservationSpec {
            template: Some(PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    name: Some(name.to_string()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    node_name: Some("test-node-0".to_string()),
                    ..Default::default()
                }),
            }),
            owners: vec![ReservationOwner::object(ReservationObjectReference::new(
                "Pod",
                "test-pod-0",
            ))],
            ttl: Some("30m".to_string()),
            expires: None,
        },
    )
}

/// Helper to set the phase and bound node of a Reservation
pub fn with_status(
    mut reservation: Reservation,
    phase: ReservationPhase,
    node_name: Option<&str>,
) -> Reservation {
    reservation.status = Some(ReservationStatus {
        phase,
        node_name: node_name.map(str::to_string),
        ..Default::default()
    });
    reservation
}

/// Helper to create a plain workload Pod
pub fn create_test_pod(namespace: &str, name: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec::default()),
        ..Default::default()
    }
}
