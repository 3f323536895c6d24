//! Shipment CRUD and search endpoints.
//!
//! All routes require a bearer token; see [`AuthenticatedUser`]. The search
//! route is registered ahead of the tracking-number route so `/search` never
//! parses as a tracking number.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::domain::{
    Error, Shipment, ShipmentFilter, ShipmentPatch, ShipmentServiceError, TrackingNumber,
    UpdateOutcome,
};

use super::ApiResult;
use super::bearer::AuthenticatedUser;
use super::state::HttpState;

/// Optional search criteria, all combined with logical AND.
///
/// Dates are RFC 3339 timestamps matched by calendar date only.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact weight in kilograms.
    pub weight: Option<Decimal>,
    pub shipping_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
}

impl From<SearchQuery> for ShipmentFilter {
    fn from(query: SearchQuery) -> Self {
        ShipmentFilter::new()
            .with_weight(query.weight)
            .with_shipping_date(query.shipping_date)
            .with_delivery_date(query.delivery_date)
            .with_origin(query.origin)
            .with_destination(query.destination)
            .with_status(query.status)
    }
}

fn parse_tracking_number(raw: &str) -> Result<TrackingNumber, Error> {
    TrackingNumber::new(raw)
        .map_err(|err| Error::invalid_request(format!("invalid tracking number: {err}")))
}

fn store_failure(err: &ShipmentServiceError) -> Error {
    error!(error = %err, "shipment store failure");
    Error::internal("An error occurred while processing your request.")
}

/// List every shipment.
#[utoipa::path(
    get,
    path = "/shipment",
    responses(
        (status = 200, description = "All shipments", body = [Shipment]),
        (status = 401, description = "Missing or invalid bearer token", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "list_shipments"
)]
#[get("")]
pub async fn list(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Shipment>>> {
    let shipments = state
        .shipments
        .get_all()
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(web::Json(shipments))
}

/// Search shipments by any combination of criteria.
#[utoipa::path(
    get,
    path = "/shipment/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Shipments matching every criterion", body = [Shipment]),
        (status = 401, description = "Missing or invalid bearer token", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "search_shipments"
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<Shipment>>> {
    let filter = ShipmentFilter::from(query.into_inner());
    let shipments = state
        .shipments
        .search(&filter)
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(web::Json(shipments))
}

/// Fetch one shipment by tracking number.
#[utoipa::path(
    get,
    path = "/shipment/{tracking_number}",
    params(("tracking_number" = String, Path, description = "Tracking number")),
    responses(
        (status = 200, description = "The shipment", body = Shipment),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "No shipment with this tracking number", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "get_shipment"
)]
#[get("/{tracking_number}")]
pub async fn get_by_tracking_number(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Shipment>> {
    let tracking_number = parse_tracking_number(&path)?;
    let shipment = state
        .shipments
        .get_by_tracking_number(&tracking_number)
        .await
        .map_err(|err| store_failure(&err))?
        .ok_or_else(|| Error::not_found("Shipment not found"))?;
    Ok(web::Json(shipment))
}

/// Create a shipment.
#[utoipa::path(
    post,
    path = "/shipment",
    request_body = Shipment,
    responses(
        (status = 201, description = "Shipment created", body = Shipment),
        (status = 400, description = "Invalid payload or duplicate tracking number", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "create_shipment"
)]
#[post("")]
pub async fn create(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    payload: web::Json<Shipment>,
) -> ApiResult<HttpResponse> {
    let shipment = payload.into_inner();
    state.shipments.add(&shipment).await.map_err(|err| match err {
        ShipmentServiceError::Duplicate { .. } => Error::duplicate_key("Shipment already exists"),
        other => store_failure(&other),
    })?;

    let location = format!("/shipment/{}", shipment.tracking_number());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(shipment))
}

/// Update a shipment in place.
///
/// Fields identical to the stored record are left alone; when nothing
/// differs the store is not touched and the response says so.
#[utoipa::path(
    put,
    path = "/shipment/{tracking_number}",
    params(("tracking_number" = String, Path, description = "Tracking number")),
    request_body = ShipmentPatch,
    responses(
        (status = 200, description = "Updated shipment, or a no-change notice", body = Shipment),
        (status = 400, description = "Invalid payload or unknown tracking number", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "update_shipment"
)]
#[put("/{tracking_number}")]
pub async fn update(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ShipmentPatch>,
) -> ApiResult<HttpResponse> {
    let tracking_number = parse_tracking_number(&path)?;
    let outcome = state
        .shipments
        .update(&tracking_number, &payload)
        .await
        .map_err(|err| match err {
            ShipmentServiceError::NotFound { .. } => Error::invalid_request("Shipment not found"),
            other => store_failure(&other),
        })?;

    match outcome {
        UpdateOutcome::Updated(shipment) => Ok(HttpResponse::Ok().json(shipment)),
        UpdateOutcome::Unchanged => {
            Ok(HttpResponse::Ok().json(json!({ "message": "No changes made" })))
        }
    }
}

/// Delete a shipment by tracking number.
#[utoipa::path(
    delete,
    path = "/shipment/{tracking_number}",
    params(("tracking_number" = String, Path, description = "Tracking number")),
    responses(
        (status = 200, description = "Shipment deleted"),
        (status = 400, description = "Unknown tracking number", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error)
    ),
    tags = ["shipment"],
    operation_id = "delete_shipment"
)]
#[delete("/{tracking_number}")]
pub async fn remove(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let tracking_number = parse_tracking_number(&path)?;
    state
        .shipments
        .delete_by_tracking_number(&tracking_number)
        .await
        .map_err(|err| match err {
            ShipmentServiceError::NotFound { .. } => {
                Error::invalid_request("Shipment does not exist")
            }
            other => store_failure(&other),
        })?;
    Ok(HttpResponse::Ok().finish())
}

/// Mount the shipment routes under `/shipment`.
///
/// `search` must come before `get_by_tracking_number` or the path parameter
/// route would shadow it.
pub fn scope() -> actix_web::Scope {
    web::scope("/shipment")
        .service(list)
        .service(search)
        .service(create)
        .service(get_by_tracking_number)
        .service(update)
        .service(remove)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use crate::auth::TokenIssuer;
    use crate::domain::ports::FixtureUserDirectory;
    use crate::domain::{Role, ShipmentService};
    use crate::outbound::persistence::InMemoryShipmentStore;

    use super::*;

    const SECRET: &str = "shipment-route-secret";

    fn state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            ShipmentService::new(Arc::new(InMemoryShipmentStore::new())),
            Arc::new(FixtureUserDirectory),
            Some(TokenIssuer::new(SECRET)),
        ))
    }

    fn bearer() -> String {
        let token = TokenIssuer::new(SECRET)
            .issue("ops@example.com", Role::Admin)
            .expect("token mints");
        format!("Bearer {token}")
    }

    fn shipment_payload(tracking_number: &str, status: &str) -> Value {
        json!({
            "trackingNumber": tracking_number,
            "status": status,
            "origin": "Rotterdam",
            "destination": "Oslo",
            "weight": 200,
            "shippingDate": "2024-01-01T10:30:00Z",
        })
    }

    macro_rules! test_app {
        () => {
            test::init_service(App::new().app_data(state()).service(scope())).await
        };
    }

    macro_rules! seed {
        ($app:expr, $payload:expr) => {{
            let res = test::call_service(
                $app,
                test::TestRequest::post()
                    .uri("/shipment")
                    .insert_header((header::AUTHORIZATION, bearer()))
                    .set_json($payload)
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }};
    }

    #[actix_web::test]
    async fn routes_reject_requests_without_a_token() {
        let app = test_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/shipment").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_answers_201_with_the_shipment_and_location() {
        let app = test_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/shipment")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(shipment_payload("TN-1001", "In Transit"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/shipment/TN-1001")
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["trackingNumber"], "TN-1001");
        assert_eq!(body["status"], "In Transit");
    }

    #[actix_web::test]
    async fn duplicate_create_answers_400_with_a_stable_message() {
        let app = test_app!();
        let payload = shipment_payload("TN-1001", "In Transit");
        seed!(&app, &payload);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/shipment")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Shipment already exists");
        assert_eq!(body["code"], "duplicate_key");
    }

    #[actix_web::test]
    async fn invalid_payload_answers_400() {
        let app = test_app!();

        // Negative weight fails domain validation inside deserialization.
        let mut payload = shipment_payload("TN-1001", "In Transit");
        payload["weight"] = json!(-1);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/shipment")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_by_tracking_number_round_trips() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment/TN-1001")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["destination"], "Oslo");
        // An absent delivery date is omitted, not serialized as null.
        assert!(body.get("deliveryDate").is_none());
    }

    #[actix_web::test]
    async fn get_unknown_tracking_number_answers_404() {
        let app = test_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment/TN-9999")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_returns_every_stored_shipment() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));
        seed!(&app, &shipment_payload("TN-1002", "Delivered"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Vec<Value> = test::read_body_json(res).await;
        assert_eq!(body.len(), 2);
    }

    #[actix_web::test]
    async fn update_changes_every_differing_field() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));

        let mut patch = shipment_payload("TN-1001", "Delivered");
        patch["weight"] = json!(250);
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/shipment/TN-1001")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(patch)
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "Delivered");
        assert_eq!(body["weight"], json!(250));
    }

    #[actix_web::test]
    async fn update_without_differences_reports_no_changes() {
        let app = test_app!();
        let payload = shipment_payload("TN-1001", "In Transit");
        seed!(&app, &payload);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/shipment/TN-1001")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "No changes made");
    }

    #[actix_web::test]
    async fn update_unknown_tracking_number_answers_400() {
        let app = test_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/shipment/TN-9999")
                .insert_header((header::AUTHORIZATION, bearer()))
                .set_json(shipment_payload("TN-9999", "Delivered"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Shipment not found");
    }

    #[actix_web::test]
    async fn delete_then_delete_again_answers_400() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));

        let delete_request = || {
            test::TestRequest::delete()
                .uri("/shipment/TN-1001")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request()
        };

        let res = test::call_service(&app, delete_request()).await;
        assert!(res.status().is_success());

        let res = test::call_service(&app, delete_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Shipment does not exist");
    }

    #[actix_web::test]
    async fn search_combines_criteria_with_and_semantics() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));
        seed!(&app, &shipment_payload("TN-1002", "Delivered"));
        let mut other_origin = shipment_payload("TN-1003", "Delivered");
        other_origin["origin"] = json!("Hamburg");
        seed!(&app, &other_origin);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment/search?status=Delivered&origin=Rotterdam")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Vec<Value> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["trackingNumber"], "TN-1002");
    }

    #[actix_web::test]
    async fn search_with_no_criteria_returns_everything() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment/search")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Vec<Value> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
    }

    #[actix_web::test]
    async fn search_matches_shipping_date_by_calendar_day() {
        let app = test_app!();
        seed!(&app, &shipment_payload("TN-1001", "In Transit"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/shipment/search?shippingDate=2024-01-01T23:59:00Z")
                .insert_header((header::AUTHORIZATION, bearer()))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Vec<Value> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
    }

    #[std::prelude::v1::test]
    fn blank_query_text_imposes_no_constraint() {
        let filter = ShipmentFilter::from(SearchQuery {
            status: Some("   ".to_owned()),
            ..SearchQuery::default()
        });
        assert!(filter.is_empty());
    }

    #[std::prelude::v1::test]
    fn query_dates_carry_through_to_the_filter() {
        let shipping = chrono::Utc
            .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        let filter = ShipmentFilter::from(SearchQuery {
            shipping_date: Some(shipping),
            ..SearchQuery::default()
        });
        assert_eq!(
            filter,
            ShipmentFilter::new().with_shipping_date(Some(shipping))
        );
    }
}
