//! Persistence adapters.
//!
//! The backing store is an in-memory map; swapping in a database means
//! implementing [`crate::domain::ports::ShipmentStore`] and
//! [`crate::domain::ports::UserDirectory`] against it.

mod memory;

pub use memory::{InMemoryShipmentStore, InMemoryUserDirectory};
