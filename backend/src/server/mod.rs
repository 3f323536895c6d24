//! Server construction and middleware wiring.

mod config;

pub use config::{Cli, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use crate::auth::TokenIssuer;
use crate::doc::openapi_json;
use crate::domain::ports::FixtureUserDirectory;
use crate::domain::{Role, ShipmentService, UserAccount};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::login::login;
use crate::inbound::http::shipments;
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestTrace;
use crate::outbound::persistence::{InMemoryShipmentStore, InMemoryUserDirectory};

/// Build the handler state from configuration.
///
/// Persistence is the in-memory store; the user directory is seeded with the
/// fixture account so a fresh instance accepts a known login.
#[must_use]
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    if config.signing_key.is_none() {
        warn!("no signing key configured; login will fail until one is provided");
    }

    let store = Arc::new(InMemoryShipmentStore::new());
    let users = Arc::new(InMemoryUserDirectory::new(vec![UserAccount::new(
        FixtureUserDirectory::EMAIL,
        FixtureUserDirectory::PASSWORD,
        Role::Admin,
    )]));
    let tokens = config.signing_key.as_deref().map(TokenIssuer::new);

    HttpState::new(
        ShipmentService::with_policy(store, config.reconcile_policy),
        users,
        tokens,
    )
}

/// Assemble the application with every route and middleware registered.
///
/// Shared between the real server and the integration tests so both exercise
/// the same routing table.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(RequestTrace)
        .service(login)
        .service(shipments::scope())
        .service(openapi_json)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn build_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(config));

    let server = HttpServer::new(move || build_app(http_state.clone(), health_state.clone()))
        .bind(config.bind_addr())?
        .run();
    Ok(server)
}
