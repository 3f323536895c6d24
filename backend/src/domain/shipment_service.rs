//! Shipment facade: translates request-level operations into store calls.
//!
//! Owns the policy decisions around the external store: existence checks,
//! duplicate detection, and invoking the reconciler so unchanged updates
//! never reach the store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{ShipmentStore, ShipmentStoreError};
use crate::domain::reconcile::{ReconcilePolicy, reconcile};
use crate::domain::{Shipment, ShipmentFilter, ShipmentPatch, TrackingNumber};

/// Failures surfaced by the facade as distinguishable error kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentServiceError {
    /// Attempted create with an existing tracking number.
    #[error("Shipment already exists")]
    Duplicate { tracking_number: String },
    /// Attempted update or delete on a missing tracking number.
    #[error("Shipment does not exist")]
    NotFound { tracking_number: String },
    /// Anything else from the store layer, surfaced without detail leakage.
    #[error(transparent)]
    Store(#[from] ShipmentStoreError),
}

/// Result of an update request.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// At least one field differed; the stored record was rewritten.
    Updated(Shipment),
    /// Nothing differed; no write was issued.
    Unchanged,
}

/// Facade over the shipment store.
#[derive(Clone)]
pub struct ShipmentService {
    store: Arc<dyn ShipmentStore>,
    policy: ReconcilePolicy,
}

impl ShipmentService {
    /// Build a facade using the corrected all-fields reconcile policy.
    #[must_use]
    pub fn new(store: Arc<dyn ShipmentStore>) -> Self {
        Self::with_policy(store, ReconcilePolicy::default())
    }

    /// Build a facade with an explicit reconcile policy.
    #[must_use]
    pub fn with_policy(store: Arc<dyn ShipmentStore>, policy: ReconcilePolicy) -> Self {
        Self { store, policy }
    }

    /// Return every shipment; an empty set is valid.
    pub async fn get_all(&self) -> Result<Vec<Shipment>, ShipmentServiceError> {
        Ok(self.store.fetch_all().await?)
    }

    /// Return the matching shipment. Absence is not an error.
    pub async fn get_by_tracking_number(
        &self,
        tracking_number: &TrackingNumber,
    ) -> Result<Option<Shipment>, ShipmentServiceError> {
        Ok(self.store.fetch(tracking_number).await?)
    }

    /// Insert a new shipment, failing when the tracking number exists.
    pub async fn add(&self, shipment: &Shipment) -> Result<(), ShipmentServiceError> {
        if self.store.fetch(shipment.tracking_number()).await?.is_some() {
            return Err(ShipmentServiceError::Duplicate {
                tracking_number: shipment.tracking_number().to_string(),
            });
        }
        match self.store.insert(shipment).await {
            Ok(()) => {
                info!(tracking_number = %shipment.tracking_number(), "shipment created");
                Ok(())
            }
            // The store enforces uniqueness too; a concurrent insert between
            // the check and the write surfaces as a duplicate, not a 500.
            Err(ShipmentStoreError::Duplicate { tracking_number }) => {
                Err(ShipmentServiceError::Duplicate { tracking_number })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Reconcile the patch against the stored record and persist only when
    /// something changed.
    pub async fn update(
        &self,
        tracking_number: &TrackingNumber,
        patch: &ShipmentPatch,
    ) -> Result<UpdateOutcome, ShipmentServiceError> {
        let Some(mut current) = self.store.fetch(tracking_number).await? else {
            return Err(ShipmentServiceError::NotFound {
                tracking_number: tracking_number.to_string(),
            });
        };

        if !reconcile(&mut current, patch, self.policy) {
            debug!(tracking_number = %tracking_number, "update requested no changes");
            return Ok(UpdateOutcome::Unchanged);
        }

        match self.store.update(&current).await {
            Ok(()) => {
                info!(tracking_number = %tracking_number, "shipment updated");
                Ok(UpdateOutcome::Updated(current))
            }
            Err(ShipmentStoreError::Missing { tracking_number }) => {
                Err(ShipmentServiceError::NotFound { tracking_number })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove one shipment, failing when the tracking number is missing.
    pub async fn delete_by_tracking_number(
        &self,
        tracking_number: &TrackingNumber,
    ) -> Result<(), ShipmentServiceError> {
        match self.store.remove(tracking_number).await {
            Ok(()) => {
                info!(tracking_number = %tracking_number, "shipment deleted");
                Ok(())
            }
            Err(ShipmentStoreError::Missing { tracking_number }) => {
                Err(ShipmentServiceError::NotFound { tracking_number })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Return the intersection of all provided criteria.
    pub async fn search(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<Shipment>, ShipmentServiceError> {
        Ok(self.store.scan(filter).await?)
    }
}
