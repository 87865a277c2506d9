//! The identity-provider boundary.
//!
//! The engine never resolves credentials itself; it delegates to an
//! [`IdentityProvider`] and trusts the [`User`] it returns. Real
//! deployments wire an HTTP client here; tests and demos use
//! [`StaticIdentityProvider`].

use crate::AuthError;
use async_trait::async_trait;
use vcp_types::User;

/// Resolves credentials to a fully populated [`User`].
///
/// # Contract
///
/// - Success returns a complete user record (id, level, group,
///   organization, and — for production users — project assignments).
/// - Failure is [`AuthError::IdentityFailed`] with a human-readable
///   reason. The engine does not retry.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Authenticates the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::IdentityFailed`] on invalid credentials or
    /// provider failure.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

/// A fixed in-memory directory of `(email, password) → User`.
///
/// Useful for demos and tests; not a production provider.
///
/// # Example
///
/// ```
/// use vcp_auth::{IdentityProvider, StaticIdentityProvider};
/// use vcp_types::{PermissionLevel, User, UserId};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let admin = User::new(
///     UserId::new(),
///     "admin@example.com",
///     "Admin",
///     PermissionLevel::Admin,
///     "Example Motors",
/// );
/// let provider = StaticIdentityProvider::new()
///     .with_user("admin@example.com", "hunter2", admin);
///
/// assert!(provider.authenticate("admin@example.com", "hunter2").await.is_ok());
/// assert!(provider.authenticate("admin@example.com", "wrong").await.is_err());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    entries: Vec<(String, String, User)>,
}

impl StaticIdentityProvider {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user under the given credentials.
    #[must_use]
    pub fn with_user(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        user: User,
    ) -> Self {
        self.entries.push((email.into(), password.into(), user));
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.entries
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, user)| user.clone())
            .ok_or_else(|| AuthError::IdentityFailed("invalid credentials".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcp_types::{PermissionLevel, UserId};

    fn user() -> User {
        User::new(
            UserId::new(),
            "admin@example.com",
            "Admin",
            PermissionLevel::Admin,
            "Example Motors",
        )
    }

    #[tokio::test]
    async fn known_credentials_resolve() {
        let u = user();
        let provider =
            StaticIdentityProvider::new().with_user("admin@example.com", "hunter2", u.clone());

        let resolved = provider
            .authenticate("admin@example.com", "hunter2")
            .await
            .expect("known credentials");
        assert_eq!(resolved, u);
    }

    #[tokio::test]
    async fn wrong_password_fails() {
        let provider =
            StaticIdentityProvider::new().with_user("admin@example.com", "hunter2", user());

        let err = provider
            .authenticate("admin@example.com", "wrong")
            .await
            .expect_err("wrong password");
        assert!(matches!(err, AuthError::IdentityFailed(_)));
    }

    #[tokio::test]
    async fn unknown_email_fails() {
        let provider = StaticIdentityProvider::new();
        let err = provider
            .authenticate("nobody@example.com", "x")
            .await
            .expect_err("unknown email");
        assert!(matches!(err, AuthError::IdentityFailed(_)));
    }
}
