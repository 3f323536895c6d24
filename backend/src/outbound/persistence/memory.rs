//! In-memory adapters for the shipment store and user directory ports.
//!
//! Each operation takes a single lock guard, so check-then-act sequences
//! (insert uniqueness, update/delete existence) are atomic in-process. Lock
//! poisoning is surfaced as a backend error rather than a panic.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{
    ShipmentStore, ShipmentStoreError, UserDirectory, UserDirectoryError,
};
use crate::domain::{LoginCredentials, Shipment, ShipmentFilter, TrackingNumber, UserAccount};

/// Shipment store backed by a map keyed on the tracking number.
///
/// Enforces the tracking-number uniqueness constraint so the facade can
/// detect duplicate inserts.
#[derive(Debug, Default)]
pub struct InMemoryShipmentStore {
    shipments: RwLock<BTreeMap<TrackingNumber, Shipment>>,
}

impl InMemoryShipmentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShipmentStore for InMemoryShipmentStore {
    async fn fetch_all(&self) -> Result<Vec<Shipment>, ShipmentStoreError> {
        let shipments = self
            .shipments
            .read()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        Ok(shipments.values().cloned().collect())
    }

    async fn fetch(
        &self,
        tracking_number: &TrackingNumber,
    ) -> Result<Option<Shipment>, ShipmentStoreError> {
        let shipments = self
            .shipments
            .read()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        Ok(shipments.get(tracking_number).cloned())
    }

    async fn insert(&self, shipment: &Shipment) -> Result<(), ShipmentStoreError> {
        let mut shipments = self
            .shipments
            .write()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        if shipments.contains_key(shipment.tracking_number()) {
            return Err(ShipmentStoreError::duplicate(shipment.tracking_number()));
        }
        shipments.insert(shipment.tracking_number().clone(), shipment.clone());
        Ok(())
    }

    async fn update(&self, shipment: &Shipment) -> Result<(), ShipmentStoreError> {
        let mut shipments = self
            .shipments
            .write()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        let Some(stored) = shipments.get_mut(shipment.tracking_number()) else {
            return Err(ShipmentStoreError::missing(shipment.tracking_number()));
        };
        *stored = shipment.clone();
        Ok(())
    }

    async fn remove(&self, tracking_number: &TrackingNumber) -> Result<(), ShipmentStoreError> {
        let mut shipments = self
            .shipments
            .write()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        if shipments.remove(tracking_number).is_none() {
            return Err(ShipmentStoreError::missing(tracking_number));
        }
        Ok(())
    }

    async fn scan(&self, filter: &ShipmentFilter) -> Result<Vec<Shipment>, ShipmentStoreError> {
        let shipments = self
            .shipments
            .read()
            .map_err(|_| ShipmentStoreError::backend("shipment store lock poisoned"))?;
        Ok(filter.apply(shipments.values().cloned().collect()))
    }
}

/// User directory backed by a fixed list of accounts.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    accounts: Vec<UserAccount>,
}

impl InMemoryUserDirectory {
    /// Build a directory from a fixed account list.
    #[must_use]
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn check_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        Ok(self
            .accounts
            .iter()
            .find(|account| {
                account.email() == credentials.email()
                    && account.password() == credentials.password()
            })
            .cloned())
    }
}
