//! Partial-update reconciliation for shipments.
//!
//! Given the stored shipment and a requested update, decide whether any of
//! the six mutable fields actually changed and apply only the changed ones.
//! Pure, never fails; absence of the target record is the caller's concern.

use crate::domain::{Shipment, ShipmentPatch};

/// How differing fields are applied during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcilePolicy {
    /// Apply every differing field. The corrected default.
    #[default]
    AllFields,
    /// Apply only the first differing field (fixed order: status, origin,
    /// destination, weight, shipping date, delivery date) and stop there.
    ///
    /// Reproduces the behaviour of the system this service replaced, where a
    /// request changing two fields persisted only the first. Kept as a
    /// compatibility toggle; do not use it for new deployments.
    FirstDifference,
}

/// Apply `patch` to `current`, returning whether anything changed.
///
/// Fields are compared in a fixed order with exact value equality. A
/// delivery date that is absent on both sides is equal; absent on one side
/// only is a difference. When nothing differs, `current` is left untouched
/// and the caller must not issue a write.
#[must_use]
pub fn reconcile(current: &mut Shipment, patch: &ShipmentPatch, policy: ReconcilePolicy) -> bool {
    let mut changed = false;

    if current.status() != patch.status() {
        current.set_status(patch.status().to_owned());
        if policy == ReconcilePolicy::FirstDifference {
            return true;
        }
        changed = true;
    }
    if current.origin() != patch.origin() {
        current.set_origin(patch.origin().to_owned());
        if policy == ReconcilePolicy::FirstDifference {
            return true;
        }
        changed = true;
    }
    if current.destination() != patch.destination() {
        current.set_destination(patch.destination().to_owned());
        if policy == ReconcilePolicy::FirstDifference {
            return true;
        }
        changed = true;
    }
    if current.weight() != patch.weight() {
        current.set_weight(patch.weight());
        if policy == ReconcilePolicy::FirstDifference {
            return true;
        }
        changed = true;
    }
    if current.shipping_date() != patch.shipping_date() {
        current.set_shipping_date(patch.shipping_date());
        if policy == ReconcilePolicy::FirstDifference {
            return true;
        }
        changed = true;
    }
    if current.delivery_date() != patch.delivery_date() {
        current.set_delivery_date(patch.delivery_date());
        changed = true;
    }

    changed
}
