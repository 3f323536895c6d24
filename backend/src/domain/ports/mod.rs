//! Domain ports for the hexagonal boundary.

mod shipment_store;
mod user_directory;

#[cfg(test)]
pub use shipment_store::MockShipmentStore;
pub use shipment_store::{FixtureShipmentStore, ShipmentStore, ShipmentStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
