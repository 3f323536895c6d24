//! Port abstraction for the external shipment store.
//!
//! The store is a leaf collaborator offering record CRUD and filtered scans.
//! It enforces the tracking-number uniqueness constraint so the facade can
//! detect duplicate inserts; all other policy lives in the facade.

use async_trait::async_trait;

use crate::domain::{Shipment, ShipmentFilter, TrackingNumber};

/// Errors raised by shipment store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentStoreError {
    /// Insert rejected because the tracking number already exists.
    #[error("shipment {tracking_number} already exists")]
    Duplicate { tracking_number: String },
    /// Update or delete targeted a tracking number that is not stored.
    #[error("shipment {tracking_number} does not exist")]
    Missing { tracking_number: String },
    /// The backing store failed during execution.
    #[error("shipment store failed: {message}")]
    Backend { message: String },
}

impl ShipmentStoreError {
    pub(crate) fn duplicate(tracking_number: &TrackingNumber) -> Self {
        Self::Duplicate {
            tracking_number: tracking_number.to_string(),
        }
    }

    pub(crate) fn missing(tracking_number: &TrackingNumber) -> Self {
        Self::Missing {
            tracking_number: tracking_number.to_string(),
        }
    }

    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port for shipment persistence adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Read every stored shipment; order is store-defined.
    async fn fetch_all(&self) -> Result<Vec<Shipment>, ShipmentStoreError>;

    /// Read one shipment by tracking number. Absence is not an error.
    async fn fetch(
        &self,
        tracking_number: &TrackingNumber,
    ) -> Result<Option<Shipment>, ShipmentStoreError>;

    /// Insert a new shipment, rejecting duplicates.
    async fn insert(&self, shipment: &Shipment) -> Result<(), ShipmentStoreError>;

    /// Replace the stored record with the same tracking number.
    async fn update(&self, shipment: &Shipment) -> Result<(), ShipmentStoreError>;

    /// Remove one shipment by tracking number.
    async fn remove(&self, tracking_number: &TrackingNumber) -> Result<(), ShipmentStoreError>;

    /// Read every shipment matching the filter.
    async fn scan(&self, filter: &ShipmentFilter) -> Result<Vec<Shipment>, ShipmentStoreError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Reads see an empty store; writes succeed without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShipmentStore;

#[async_trait]
impl ShipmentStore for FixtureShipmentStore {
    async fn fetch_all(&self) -> Result<Vec<Shipment>, ShipmentStoreError> {
        Ok(Vec::new())
    }

    async fn fetch(
        &self,
        _tracking_number: &TrackingNumber,
    ) -> Result<Option<Shipment>, ShipmentStoreError> {
        Ok(None)
    }

    async fn insert(&self, _shipment: &Shipment) -> Result<(), ShipmentStoreError> {
        Ok(())
    }

    async fn update(&self, _shipment: &Shipment) -> Result<(), ShipmentStoreError> {
        Ok(())
    }

    async fn remove(&self, _tracking_number: &TrackingNumber) -> Result<(), ShipmentStoreError> {
        Ok(())
    }

    async fn scan(&self, _filter: &ShipmentFilter) -> Result<Vec<Shipment>, ShipmentStoreError> {
        Ok(Vec::new())
    }
}
