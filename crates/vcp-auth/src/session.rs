//! Process-wide session state.
//!
//! [`AuthSession`] holds at most one [`User`] plus a loading flag.
//! Exactly one session exists per running client instance; it is owned
//! by the engine and injected into consumers rather than accessed as
//! ambient global state, which keeps the single-writer invariant
//! explicit and the whole thing testable.
//!
//! # State Machine
//!
//! ```text
//! Uninitialized --(restore)--> Authenticated | Anonymous
//! Anonymous     --(login ok)--> Authenticated
//! Authenticated --(login ok)--> Authenticated (new user; re-login overwrites)
//! Authenticated --(login failed)--> Authenticated (unchanged)
//! *             --(logout)--> Anonymous
//! ```
//!
//! `Loading` is a transient substate while a login awaits the identity
//! provider. Guards observing it render a loading indicator and must
//! not race ahead; on login failure the state returns to exactly what
//! it was before the attempt.
//!
//! All mutation happens under one write lock, so no reader ever
//! observes a partially updated user.

use parking_lot::RwLock;
use vcp_types::User;

/// Observable session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The startup restore has not run yet.
    Uninitialized,
    /// A login is resolving.
    Loading,
    /// A user is present.
    Authenticated,
    /// No user is present.
    Anonymous,
}

#[derive(Debug, Default)]
struct SessionInner {
    user: Option<User>,
    loading: bool,
    initialized: bool,
}

/// The process-wide session record: one `User` or none.
///
/// Mutated only by restore, login, and logout. Queries take a read
/// lock and return snapshots, so they are safe to call at any time.
#[derive(Debug, Default)]
pub struct AuthSession {
    inner: RwLock<SessionInner>,
}

impl AuthSession {
    /// Creates an uninitialized session (no restore attempted yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let inner = self.inner.read();
        if inner.loading {
            SessionStatus::Loading
        } else if !inner.initialized {
            SessionStatus::Uninitialized
        } else if inner.user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }

    /// Returns a snapshot of the current user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    /// Applies the result of the startup restore.
    ///
    /// Transitions `Uninitialized → Authenticated | Anonymous`.
    pub fn set_restored(&self, user: Option<User>) {
        let mut inner = self.inner.write();
        inner.user = user;
        inner.loading = false;
        inner.initialized = true;
    }

    /// Marks a login as in flight.
    ///
    /// Returns `false` if one is already resolving; the caller must
    /// then reject the attempt rather than proceed.
    pub fn begin_login(&self) -> bool {
        let mut inner = self.inner.write();
        if inner.loading {
            return false;
        }
        inner.loading = true;
        true
    }

    /// Replaces the session with a freshly authenticated user.
    ///
    /// The replacement is atomic: readers see either the old state or
    /// the new user, never a mix.
    pub fn complete_login(&self, user: User) {
        let mut inner = self.inner.write();
        inner.user = Some(user);
        inner.loading = false;
        inner.initialized = true;
    }

    /// Clears the loading flag after a failed login.
    ///
    /// The user field is untouched: a previously authenticated session
    /// survives a failed re-login.
    pub fn fail_login(&self) {
        let mut inner = self.inner.write();
        inner.loading = false;
        inner.initialized = true;
    }

    /// Clears the session unconditionally. Idempotent.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.user = None;
        inner.loading = false;
        inner.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcp_types::{PermissionLevel, UserId};

    fn user() -> User {
        User::new(
            UserId::new(),
            "user@example.com",
            "Test User",
            PermissionLevel::Admin,
            "Example Motors",
        )
    }

    #[test]
    fn new_session_is_uninitialized() {
        let session = AuthSession::new();
        assert_eq!(session.status(), SessionStatus::Uninitialized);
        assert!(session.current_user().is_none());
    }

    #[test]
    fn restore_with_user_authenticates() {
        let session = AuthSession::new();
        session.set_restored(Some(user()));
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert!(session.current_user().is_some());
    }

    #[test]
    fn restore_without_user_is_anonymous() {
        let session = AuthSession::new();
        session.set_restored(None);
        assert_eq!(session.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn begin_login_enters_loading() {
        let session = AuthSession::new();
        session.set_restored(None);

        assert!(session.begin_login());
        assert_eq!(session.status(), SessionStatus::Loading);
    }

    #[test]
    fn second_begin_login_is_refused() {
        let session = AuthSession::new();
        session.set_restored(None);

        assert!(session.begin_login());
        assert!(!session.begin_login());
    }

    #[test]
    fn complete_login_replaces_user() {
        let session = AuthSession::new();
        session.set_restored(None);
        session.begin_login();

        let u = user();
        session.complete_login(u.clone());
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.current_user(), Some(u));
    }

    #[test]
    fn fail_login_keeps_previous_user() {
        let session = AuthSession::new();
        let u = user();
        session.set_restored(Some(u.clone()));

        session.begin_login();
        session.fail_login();

        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.current_user(), Some(u));
    }

    #[test]
    fn clear_is_idempotent() {
        let session = AuthSession::new();
        session.set_restored(Some(user()));

        session.clear();
        assert_eq!(session.status(), SessionStatus::Anonymous);

        session.clear();
        assert_eq!(session.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn relogin_overwrites_user() {
        let session = AuthSession::new();
        let first = user();
        session.set_restored(Some(first.clone()));

        let second = user();
        session.begin_login();
        session.complete_login(second.clone());

        assert_eq!(session.current_user(), Some(second));
        assert_ne!(session.current_user(), Some(first));
    }
}
