//! The authorization engine: single source of truth for "what can the
//! current user do".
//!
//! The engine owns the process-wide [`AuthSession`], delegates
//! credential resolution to an [`IdentityProvider`], and persists the
//! session through a [`SessionStore`]. Every permission, group, level,
//! and project-access query goes through it; guards never consult the
//! matrix directly.
//!
//! # Lifecycle
//!
//! ```text
//! AuthEngine::new()        → Uninitialized
//! engine.restore()         → Authenticated | Anonymous   (best effort)
//! engine.login(..).await   → Authenticated (ok) | prior state (err)
//! engine.logout()          → Anonymous                   (idempotent)
//! ```
//!
//! # Fail-Closed Queries
//!
//! Every query answers `false` when no user is present, whatever the
//! input. [`has_any_permission`](AuthEngine::has_any_permission) of an
//! empty list is `false` (one-of-nothing is unsatisfiable) while
//! [`has_all_permissions`](AuthEngine::has_all_permissions) of an
//! empty list is `true` (requiring nothing blocks nothing). The
//! asymmetry is intentional and pinned by regression tests.

use std::sync::Arc;

use crate::matrix::permissions_for;
use crate::session::{AuthSession, SessionStatus};
use crate::store::StoreError;
use crate::{AuthError, IdentityProvider, Permission, SessionStore};
use vcp_types::{PermissionGroup, PermissionLevel, ProjectId, User};

/// Stateful holder of the current identity; answers every
/// authorization query.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vcp_auth::{AuthEngine, MemorySessionStore, Permission, StaticIdentityProvider};
/// use vcp_types::{PermissionLevel, User, UserId};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let reviewer = User::new(
///     UserId::new(),
///     "reviewer@example.com",
///     "Reviewer",
///     PermissionLevel::BusinessUser,
///     "Example Motors",
/// );
/// let provider = StaticIdentityProvider::new()
///     .with_user("reviewer@example.com", "hunter2", reviewer);
///
/// let engine = AuthEngine::new(Arc::new(provider), Arc::new(MemorySessionStore::new()));
/// engine.restore();
///
/// assert!(!engine.has_permission(Permission::ReviewApprove));
/// engine.login("reviewer@example.com", "hunter2").await.unwrap();
/// assert!(engine.has_permission(Permission::ReviewApprove));
/// assert!(!engine.has_permission(Permission::UserManage));
/// # });
/// ```
#[derive(Debug)]
pub struct AuthEngine {
    session: AuthSession,
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
}

impl AuthEngine {
    /// Creates an engine with no restore attempted yet.
    ///
    /// Call [`restore`](Self::restore) once at startup to leave the
    /// `Uninitialized` state.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            session: AuthSession::new(),
            provider,
            store,
        }
    }

    /// Returns the session lifecycle state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Returns a snapshot of the current user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Attempts to restore a persisted session. Best effort; never
    /// fails.
    ///
    /// Corrupt or inconsistent records (level/group mismatch) are
    /// discarded and purged, leaving the session `Anonymous`.
    pub fn restore(&self) {
        match self.store.load() {
            Ok(Some(user)) if user.is_consistent() => {
                tracing::info!(user = %user.id, level = %user.level, "session restored");
                self.session.set_restored(Some(user));
            }
            Ok(Some(user)) => {
                tracing::warn!(
                    user = %user.id,
                    level = %user.level,
                    group = %user.group,
                    "persisted session has level/group mismatch, discarding"
                );
                self.purge_store();
                self.session.set_restored(None);
            }
            Ok(None) => {
                tracing::debug!("no persisted session");
                self.session.set_restored(None);
            }
            Err(StoreError::Corrupt { path, reason }) => {
                tracing::warn!(
                    path = %path.display(),
                    reason = reason,
                    "persisted session is corrupt, purging"
                );
                self.purge_store();
                self.session.set_restored(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted session");
                self.session.set_restored(None);
            }
        }
    }

    /// Resolves credentials and replaces the session on success.
    ///
    /// Exactly one login may be in flight at a time; an overlapping
    /// call is rejected with [`AuthError::LoginInProgress`] rather
    /// than racing the first one. On failure, session state is left
    /// exactly as it was before the call — a previously authenticated
    /// user stays logged in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::IdentityFailed`] from the provider, or when the
    ///   provider returns an inconsistent user record.
    /// - [`AuthError::LoginInProgress`] when another login is
    ///   resolving.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if !self.session.begin_login() {
            tracing::warn!(email = email, "login rejected: one already in progress");
            return Err(AuthError::LoginInProgress);
        }

        match self.provider.authenticate(email, password).await {
            Ok(user) if user.is_consistent() => {
                self.session.complete_login(user.clone());
                if let Err(e) = self.store.save(&user) {
                    // The login itself succeeded; persistence is best effort.
                    tracing::warn!(error = %e, "could not persist session");
                }
                tracing::info!(user = %user.id, level = %user.level, "login succeeded");
                Ok(user)
            }
            Ok(user) => {
                self.session.fail_login();
                tracing::warn!(
                    user = %user.id,
                    level = %user.level,
                    group = %user.group,
                    "provider returned level/group mismatch, rejecting"
                );
                Err(AuthError::IdentityFailed(
                    "identity provider returned an inconsistent user record".to_string(),
                ))
            }
            Err(e) => {
                self.session.fail_login();
                tracing::warn!(email = email, error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Clears the session and the persisted record. Idempotent.
    pub fn logout(&self) {
        self.session.clear();
        self.purge_store();
        tracing::info!("logged out");
    }

    /// Checks whether the current user holds one capability tag.
    ///
    /// `false` when no user is present. This is the only place
    /// permission bits are evaluated; every higher-level check
    /// composes it.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self.session.current_user() {
            Some(user) => permissions_for(user.level).contains(&permission),
            None => false,
        }
    }

    /// `true` iff at least one tag is held.
    ///
    /// Empty input is `false`: "one of nothing" is unsatisfiable, so
    /// it denies rather than silently opening the route.
    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// `true` iff every tag is held.
    ///
    /// Empty input is `true`: requiring nothing is trivially
    /// satisfied. Note the asymmetry with
    /// [`has_any_permission`](Self::has_any_permission).
    #[must_use]
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    /// Exact group match; `false` when no user is present.
    ///
    /// No hierarchy climb: a Management user is not "in" Production.
    #[must_use]
    pub fn is_in_group(&self, group: PermissionGroup) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| user.group == group)
    }

    /// Exact level match; `false` when no user is present.
    #[must_use]
    pub fn has_level(&self, level: PermissionLevel) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| user.level == level)
    }

    /// Project access rule.
    ///
    /// - No user → deny.
    /// - Blanket-access groups (Management, Business) → allow
    ///   unconditionally.
    /// - Production → allow iff the project is in
    ///   `assigned_projects` (an empty list denies).
    /// - Anything else → deny.
    #[must_use]
    pub fn can_access_project(&self, project: &ProjectId) -> bool {
        let Some(user) = self.session.current_user() else {
            return false;
        };

        if user.group.has_blanket_project_access() {
            return true;
        }

        if user.group == PermissionGroup::Production {
            let allowed = user.is_assigned_to(project);
            if !allowed {
                tracing::debug!(
                    user = %user.id,
                    project = %project,
                    "project access denied: not assigned"
                );
            }
            return allowed;
        }

        // Unknown group classification: fail closed.
        false
    }

    fn purge_store(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not purge persisted session");
        }
    }
}
