//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: the
//! shipment CRUD and search endpoints, login, and the health probes, plus the
//! bearer-token security scheme. The document is served at
//! `/api-docs/openapi.json`.

use actix_web::{get, web};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Shipment, ShipmentPatch};
use crate::inbound::http::login::{LoginRequest, LoginResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Signed token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TMS backend API",
        description = "HTTP interface for token-authenticated shipment tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::shipments::list,
        crate::inbound::http::shipments::search,
        crate::inbound::http::shipments::get_by_tracking_number,
        crate::inbound::http::shipments::create,
        crate::inbound::http::shipments::update,
        crate::inbound::http::shipments::remove,
        crate::inbound::http::login::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Shipment, ShipmentPatch, LoginRequest, LoginResponse, Error, ErrorCode)),
    tags(
        (name = "shipment", description = "Operations on tracked shipments"),
        (name = "login", description = "Token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Serve the generated document for external tooling.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
