//! Reserve pod projection
//!
//! The scheduler's resource accounting only understands pods, so a
//! reservation is projected into a "reserve pod" that requests the same
//! resources and sits on the same node. Reserve pods are never created in
//! the API server; they exist for one scheduling cycle and are recognised
//! through the [`ANNOTATION_RESERVE_POD`] marker.

use std::collections::BTreeMap;

use crds::Reservation;
use k8s_openapi::api::core::v1::{Pod, PodSpec, PodStatus};
use kube::ResourceExt;
use tracing::debug;

use crate::config::DEFAULT_NAMESPACE;
use crate::phase::{is_reservation_failed, is_reservation_succeeded, reservation_key, reservation_node_name};

/// Marker annotation identifying a reserve pod
pub const ANNOTATION_RESERVE_POD: &str = "scheduling.microscaler.io/reserve-pod";

/// Name of the reservation a reserve pod was projected from
pub const ANNOTATION_RESERVATION_NAME: &str = "scheduling.microscaler.io/reservation-name";

/// Node pinned by the reservation template's `spec.nodeName`
pub const ANNOTATION_RESERVATION_NODE: &str = "scheduling.microscaler.io/reservation-node";

const RESERVE_POD_MARKER: &str = "true";

const POD_SUCCEEDED: &str = "Succeeded";
const POD_FAILED: &str = "Failed";

/// Project a reservation into a reserve pod.
///
/// Metadata and spec come from the reservation template; the reservation's
/// own labels and annotations win over the template's. The pod is named
/// after [`reservation_key`] and placed on the bound node, if any. A node
/// pinned by the template moves to [`ANNOTATION_RESERVATION_NODE`] so other
/// plugins do not treat the pod as already bound.
///
/// Never fails. A reservation without a template still yields a marked pod
/// with an empty spec.
pub fn new_reserve_pod(reservation: &Reservation) -> Pod {
    build_reserve_pod(reservation, DEFAULT_NAMESPACE)
}

pub(crate) fn build_reserve_pod(reservation: &Reservation, default_namespace: &str) -> Pod {
    let mut pod = Pod::default();
    if let Some(template) = reservation.spec.template.as_ref() {
        pod.metadata = template.metadata.clone().unwrap_or_default();
        pod.spec = template.spec.clone();
    } else {
        debug!(
            reservation = %reservation.name_any(),
            "Reservation has no template, reserve pod gets an empty spec"
        );
    }

    pod.metadata.name = Some(reservation_key(reservation));
    pod.metadata.uid = reservation.uid();
    if pod.metadata.namespace.as_deref().is_none_or(str::is_empty) {
        pod.metadata.namespace = Some(default_namespace.to_string());
    }
    // Projections are never persisted
    pod.metadata.resource_version = None;
    pod.metadata.owner_references = None;

    let labels = pod.metadata.labels.get_or_insert_with(BTreeMap::new);
    labels.extend(reservation.labels().clone());

    let annotations = pod.metadata.annotations.get_or_insert_with(BTreeMap::new);
    annotations.extend(reservation.annotations().clone());
    annotations.insert(ANNOTATION_RESERVE_POD.to_string(), RESERVE_POD_MARKER.to_string());
    annotations.insert(ANNOTATION_RESERVATION_NAME.to_string(), reservation.name_any());

    let spec = pod.spec.get_or_insert_with(PodSpec::default);
    if let Some(pinned) = spec.node_name.take().filter(|node| !node.is_empty()) {
        annotations.insert(ANNOTATION_RESERVATION_NODE.to_string(), pinned);
    }
    spec.node_name = reservation_node_name(reservation).map(str::to_string);

    let phase = if is_reservation_succeeded(reservation) {
        Some(POD_SUCCEEDED)
    } else if is_reservation_failed(reservation) {
        Some(POD_FAILED)
    } else {
        None
    };
    if let Some(phase) = phase {
        pod.status = Some(PodStatus {
            phase: Some(phase.to_string()),
            ..Default::default()
        });
    }

    pod
}

/// Whether the pod is a reserve pod produced by [`new_reserve_pod`].
///
/// Only the exact marker value counts; `None` is never a reserve pod.
pub fn is_reserve_pod<'a>(pod: impl Into<Option<&'a Pod>>) -> bool {
    pod.into()
        .and_then(|p| p.metadata.annotations.as_ref())
        .and_then(|annotations| annotations.get(ANNOTATION_RESERVE_POD))
        .is_some_and(|marker| marker == RESERVE_POD_MARKER)
}

/// Name of the reservation behind a reserve pod
pub fn reserve_pod_reservation_name(pod: &Pod) -> Option<&str> {
    reserve_pod_annotation(pod, ANNOTATION_RESERVATION_NAME)
}

/// Node pinned by the reservation template, if any
pub fn reserve_pod_node_name(pod: &Pod) -> Option<&str> {
    reserve_pod_annotation(pod, ANNOTATION_RESERVATION_NODE)
}

fn reserve_pod_annotation<'a>(pod: &'a Pod, key: &str) -> Option<&'a str> {
    if !is_reserve_pod(pod) {
        return None;
    }
    pod.metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(key))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crds::ReservationPhase;
    use k8s_openapi::api::core::v1::Container;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn test_new_reserve_pod_is_recognised() {
        let reservation = create_test_reservation("reserve-pod-0");
        let pod = new_reserve_pod(&reservation);
        assert!(is_reserve_pod(&pod));
        assert_eq!(reserve_pod_reservation_name(&pod), Some("reserve-pod-0"));
    }

    #[test]
    fn test_pinned_node_moves_to_annotation() {
        // The test fixture pins test-node-0 in the template
        let reservation = create_test_reservation("reserve-pod-0");
        let pod = new_reserve_pod(&reservation);
        assert_eq!(reserve_pod_node_name(&pod), Some("test-node-0"));
        assert_eq!(pod.spec.as_ref().and_then(|s| s.node_name.as_deref()), None);
    }

    #[test]
    fn test_bound_node_becomes_pod_node() {
        let reservation = with_status(
            create_test_reservation("reserve-pod-0"),
            ReservationPhase::Available,
            Some("test-node-1"),
        );
        let pod = new_reserve_pod(&reservation);
        assert_eq!(
            pod.spec.as_ref().and_then(|s| s.node_name.as_deref()),
            Some("test-node-1")
        );
        assert!(pod.status.is_none());
    }

    #[test]
    fn test_template_fields_are_copied() {
        let mut reservation = create_test_reservation("reserve-pod-0");
        reservation.metadata.uid = Some("uid-0".to_string());
        if let Some(spec) = reservation
            .spec
            .template
            .as_mut()
            .and_then(|t| t.spec.as_mut())
        {
            spec.scheduler_name = Some("test-scheduler".to_string());
            spec.containers = vec![Container {
                name: "main".to_string(),
                ..Default::default()
            }];
        }

        let pod = new_reserve_pod(&reservation);
        let spec = pod.spec.as_ref().unwrap();
        assert_eq!(spec.scheduler_name.as_deref(), Some("test-scheduler"));
        assert_eq!(spec.containers.len(), 1);
        assert_eq!(pod.metadata.name.as_deref(), Some("uid-0"));
        assert_eq!(pod.metadata.uid.as_deref(), Some("uid-0"));
        assert_eq!(pod.metadata.namespace.as_deref(), Some(DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_reservation_metadata_overrides_template() {
        let mut reservation = create_test_reservation("reserve-pod-0");
        if let Some(template) = reservation.spec.template.as_mut() {
            template.metadata = Some(ObjectMeta {
                namespace: Some("team-a".to_string()),
                labels: Some(BTreeMap::from([
                    ("app".to_string(), "template".to_string()),
                    ("tier".to_string(), "web".to_string()),
                ])),
                ..Default::default()
            });
        }
        reservation.metadata.labels =
            Some(BTreeMap::from([("app".to_string(), "reservation".to_string())]));

        let pod = new_reserve_pod(&reservation);
        let labels = pod.metadata.labels.as_ref().unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("reservation"));
        assert_eq!(labels.get("tier").map(String::as_str), Some("web"));
        assert_eq!(pod.metadata.namespace.as_deref(), Some("team-a"));
    }

    #[test]
    fn test_reservation_annotation_cannot_unset_marker() {
        let mut reservation = create_test_reservation("reserve-pod-0");
        reservation.metadata.annotations = Some(BTreeMap::from([(
            ANNOTATION_RESERVE_POD.to_string(),
            "false".to_string(),
        )]));
        assert!(is_reserve_pod(&new_reserve_pod(&reservation)));
    }

    #[test]
    fn test_terminal_phases_map_to_pod_phase() {
        let succeeded = with_status(
            create_test_reservation("reserve-pod-0"),
            ReservationPhase::Succeeded,
            Some("test-node-0"),
        );
        let failed = with_status(
            create_test_reservation("reserve-pod-1"),
            ReservationPhase::Failed,
            Some("test-node-0"),
        );

        let phase = |pod: &Pod| pod.status.as_ref().and_then(|s| s.phase.clone());
        assert_eq!(phase(&new_reserve_pod(&succeeded)).as_deref(), Some(POD_SUCCEEDED));
        assert_eq!(phase(&new_reserve_pod(&failed)).as_deref(), Some(POD_FAILED));
    }

    #[test]
    fn test_reserve_pod_without_uid_does_not_shadow_real_pod() {
        let reservation = create_test_reservation("web-0");
        let real = create_test_pod(DEFAULT_NAMESPACE, "web-0");
        let pod = new_reserve_pod(&reservation);

        assert_eq!(pod.metadata.namespace, real.metadata.namespace);
        assert_ne!(pod.metadata.name, real.metadata.name);
        assert_eq!(pod.metadata.name.as_deref(), Some("reservation:web-0"));
        assert_eq!(reserve_pod_reservation_name(&pod), Some("web-0"));
    }

    #[test]
    fn test_missing_template_still_marked() {
        let mut reservation = create_test_reservation("reserve-pod-0");
        reservation.spec.template = None;
        let pod = new_reserve_pod(&reservation);
        assert!(is_reserve_pod(&pod));
        assert_eq!(pod.spec, Some(PodSpec::default()));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let mut reservation = with_status(
            create_test_reservation("reserve-pod-0"),
            ReservationPhase::Available,
            Some("test-node-0"),
        );
        reservation.metadata.uid = Some("uid-0".to_string());
        assert_eq!(new_reserve_pod(&reservation), new_reserve_pod(&reservation));
    }

    #[test]
    fn test_is_reserve_pod_requires_exact_marker() {
        assert!(!is_reserve_pod(None));
        assert!(!is_reserve_pod(&create_test_pod("default", "web-0")));

        let mut pod = create_test_pod("default", "web-0");
        pod.metadata.annotations = Some(BTreeMap::from([(
            ANNOTATION_RESERVE_POD.to_string(),
            "True".to_string(),
        )]));
        assert!(!is_reserve_pod(&pod));
        assert_eq!(reserve_pod_reservation_name(&pod), None);
    }
}
