//! Bearer-token minting and verification for the login path.
//!
//! Tokens are HS256 JWTs signed with a shared symmetric key sourced from
//! configuration, carrying the account email as subject and the role as a
//! custom claim, with a fixed one-day expiry. Token refresh and revocation
//! are deliberately absent.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Failures while minting or verifying a token.
#[derive(Debug, thiserror::Error)]
#[error("token handling failed: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// Claims carried by an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    /// Role classification, serialized as its stored label.
    pub role: Role,
    /// Expiry as a unix timestamp, one day after issuance.
    pub exp: i64,
}

/// Mints and verifies bearer tokens with a shared symmetric key.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
}

impl TokenIssuer {
    /// Token lifetime.
    const TTL_DAYS: i64 = 1;

    /// Build an issuer from the configured signing key.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mint a token for the given account.
    pub fn issue(&self, email: &str, role: Role) -> Result<String, TokenError> {
        let expires_at = Utc::now() + Duration::days(Self::TTL_DAYS);
        let claims = Claims {
            sub: email.to_owned(),
            role,
            exp: expires_at.timestamp(),
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The signing key must never reach logs.
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}
