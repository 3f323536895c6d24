//! Bearer-token extractor guarding the shipment endpoints.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::domain::{Error, Role};

use super::state::HttpState;

/// Identity established from a valid bearer token.
///
/// Add this as a handler parameter to require authentication; extraction
/// fails with 401 when the token is missing, malformed, expired, or signed
/// with a different key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account email carried as the token subject.
    pub email: String,
    /// Role classification carried by the token.
    pub role: Role,
}

fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let Some(issuer) = state.tokens.as_ref() else {
        // Without a signing key no token can ever validate.
        return Err(Error::configuration_missing("Key not found"));
    };

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;

    let claims = issuer
        .verify(token)
        .map_err(|_| Error::unauthorized("invalid bearer token"))?;
    Ok(AuthenticatedUser {
        email: claims.sub,
        role: claims.role,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
