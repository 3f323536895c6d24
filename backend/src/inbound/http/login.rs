//! Login endpoint issuing bearer tokens.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::domain::{Error, LoginCredentials, LoginValidationError};

use super::ApiResult;
use super::state::HttpState;

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    pub password: String,
}

/// Login response carrying a ready-to-use `Authorization` header value.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// `Bearer `-prefixed signed token, valid for one day.
    pub token: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Validate credentials and mint a bearer token.
///
/// Credential mismatch is an authorization failure, never a system error. An
/// absent signing key is a fatal configuration error for this path.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Wrong email or password", body = Error),
        (status = 500, description = "Signing key not configured", body = Error)
    ),
    tags = ["login"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_validation_error)?;

    let account = state
        .users
        .check_user(&credentials)
        .await
        .map_err(|err| {
            error!(error = %err, "credential lookup failed");
            Error::internal("An error occurred while processing your request.")
        })?
        .ok_or_else(|| Error::unauthorized("wrong email or password"))?;

    let issuer = state
        .tokens
        .as_ref()
        .ok_or_else(|| Error::configuration_missing("Key not found"))?;
    let token = issuer.issue(account.email(), account.role()).map_err(|err| {
        error!(error = %err, "token minting failed");
        Error::internal("An error occurred while processing your request.")
    })?;

    info!(email = %account.email(), "user logged in");
    Ok(web::Json(LoginResponse {
        token: format!("Bearer {token}"),
    }))
}
