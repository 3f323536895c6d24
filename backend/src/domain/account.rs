//! User account records consumed by the credential checker.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role classification returned after a successful credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => f.write_str("Admin"),
            Self::User => f.write_str("User"),
        }
    }
}

/// A stored user record.
///
/// Read-only: the core never mutates accounts. Passwords are compared as
/// opaque strings with no hashing; that gap is inherited from the system this
/// service replaced and is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    email: String,
    password: String,
    role: Role,
}

impl UserAccount {
    /// Build an account record from its parts.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Unique account email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored password, compared as an opaque string.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role classification.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}
