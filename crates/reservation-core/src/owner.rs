//! Owner matching
//!
//! Decides whether a pod is one of the workloads a reservation was made for.
//! Owners are alternatives: the pod needs to match one of them. Within a
//! single owner every criterion that is set must match.

use crds::{
    Reservation, ReservationControllerReference, ReservationLabelSelector, ReservationObjectReference,
    ReservationOwner,
};
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;

/// Whether `pod` may consume `reservation`.
///
/// A reservation without owners matches nothing.
pub fn match_reservation_owners(pod: &Pod, reservation: &Reservation) -> bool {
    reservation
        .spec
        .owners
        .iter()
        .any(|owner| match_owner(pod, owner))
}

fn match_owner(pod: &Pod, owner: &ReservationOwner) -> bool {
    if owner.object.is_none() && owner.controller.is_none() && owner.label_selector.is_none() {
        return false;
    }
    owner.object.as_ref().is_none_or(|object| match_object(pod, object))
        && owner
            .controller
            .as_ref()
            .is_none_or(|controller| match_controller(pod, controller))
        && owner
            .label_selector
            .as_ref()
            .is_none_or(|selector| match_labels(pod, selector))
}

fn match_object(pod: &Pod, object: &ReservationObjectReference) -> bool {
    if !object.kind.is_empty() && object.kind != "Pod" {
        return false;
    }
    if let (Some(want), Some(have)) = (object.uid.as_deref(), pod.metadata.uid.as_deref()) {
        return want == have;
    }
    object.name == pod.name_any() && match_namespace(pod, object.namespace.as_deref())
}

fn match_controller(pod: &Pod, controller: &ReservationControllerReference) -> bool {
    if !match_namespace(pod, controller.namespace.as_deref()) {
        return false;
    }
    let Some(owner_ref) = pod
        .owner_references()
        .iter()
        .find(|r| r.controller == Some(true))
    else {
        return false;
    };

    if let Some(uid) = controller.uid.as_deref().filter(|uid| !uid.is_empty()) {
        return owner_ref.uid == uid;
    }
    owner_ref.kind == controller.kind
        && owner_ref.name == controller.name
        && (controller.api_version.is_empty() || owner_ref.api_version == controller.api_version)
}

fn match_labels(pod: &Pod, selector: &ReservationLabelSelector) -> bool {
    let labels = pod.labels();
    selector
        .match_labels
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

fn match_namespace(pod: &Pod, namespace: Option<&str>) -> bool {
    namespace.is_none_or(|ns| ns.is_empty() || pod.namespace().as_deref() == Some(ns))
}
