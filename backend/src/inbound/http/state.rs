//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend on
//! domain ports and services only and stay testable without real I/O.

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::domain::ShipmentService;
use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Shipment facade over the store port.
    pub shipments: ShipmentService,
    /// Credential checker for the login endpoint.
    pub users: Arc<dyn UserDirectory>,
    /// Token issuer; absent when no signing key is configured. Login then
    /// fails with a configuration error, and no bearer token can validate.
    pub tokens: Option<TokenIssuer>,
}

impl HttpState {
    /// Bundle the handler dependencies.
    #[must_use]
    pub fn new(
        shipments: ShipmentService,
        users: Arc<dyn UserDirectory>,
        tokens: Option<TokenIssuer>,
    ) -> Self {
        Self {
            shipments,
            users,
            tokens,
        }
    }
}
