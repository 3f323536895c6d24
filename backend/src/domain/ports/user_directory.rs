//! Port for credential lookups against stored user records.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, Role, UserAccount};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// The backing store failed during the lookup.
    #[error("user directory lookup failed: {message}")]
    Backend { message: String },
}

impl UserDirectoryError {
    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Credential checker port.
///
/// Exact-match lookup by email and plaintext password equality. A failed
/// match yields `None`, never an error: the caller maps absence to an
/// authorization failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the matching account, or `None` when email/password mismatch.
    async fn check_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<UserAccount>, UserDirectoryError>;
}

/// Fixture checker accepting a single well-known development credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

impl FixtureUserDirectory {
    /// Email accepted by the fixture.
    pub const EMAIL: &'static str = "admin@example.com";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
}

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn check_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        if credentials.email() == Self::EMAIL && credentials.password() == Self::PASSWORD {
            Ok(Some(UserAccount::new(
                Self::EMAIL,
                Self::PASSWORD,
                Role::Admin,
            )))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FixtureUserDirectory::EMAIL, FixtureUserDirectory::PASSWORD, true)]
    #[case(FixtureUserDirectory::EMAIL, "wrong", false)]
    #[case("other@example.com", FixtureUserDirectory::PASSWORD, false)]
    #[tokio::test]
    async fn fixture_matches_only_the_known_credential(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_match: bool,
    ) {
        let directory = FixtureUserDirectory;
        let creds = LoginCredentials::try_from_parts(email, password).expect("credential shape");
        let found = directory.check_user(&creds).await.expect("fixture lookup");
        assert_eq!(found.is_some(), should_match);
        if let Some(account) = found {
            assert_eq!(account.role(), Role::Admin);
        }
    }
}
