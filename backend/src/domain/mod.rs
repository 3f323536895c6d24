//! Domain types and services.
//!
//! Transport agnostic: inbound adapters translate HTTP requests into calls on
//! these types, outbound adapters implement the ports. Serialization
//! contracts (serde, camelCase DTO bridges) are documented per type.

mod account;
mod credentials;
mod error;
pub mod ports;
pub mod reconcile;
mod search;
mod shipment;
mod shipment_service;
mod trace_id;

pub use account::{Role, UserAccount};
pub use credentials::{LoginCredentials, LoginValidationError};
pub use error::{Error, ErrorCode};
pub use reconcile::{ReconcilePolicy, reconcile};
pub use search::ShipmentFilter;
pub use shipment::{
    LOCATION_MAX, STATUS_MAX, Shipment, ShipmentPatch, ShipmentValidationError, TRACKING_NUMBER_MAX,
    TrackingNumber,
};
pub use shipment_service::{ShipmentService, ShipmentServiceError, UpdateOutcome};
pub use trace_id::{TRACE_ID_HEADER, TraceId};
