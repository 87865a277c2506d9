//! The route/render guard: turns session state plus a stated
//! requirement into a render decision.
//!
//! A guard protects one route or view. Per render pass it asks the
//! engine where the session stands and produces exactly one
//! [`RouteDecision`]:
//!
//! 1. Session still resolving (startup restore or login in flight) →
//!    [`Loading`](RouteDecision::Loading); re-evaluated on the next
//!    state change.
//! 2. Anonymous → [`Redirect`](RouteDecision::Redirect) to the
//!    configured target (default `/`), whatever the requirement says.
//! 3. Authenticated and the requirement holds → [`Render`](RouteDecision::Render).
//! 4. Authenticated and the requirement fails →
//!    [`Fallback`](RouteDecision::Fallback) if one was supplied, else
//!    [`AccessDenied`](RouteDecision::AccessDenied). Never a redirect:
//!    redirecting is reserved for the unauthenticated case.
//!
//! A guard carries exactly one requirement kind — the tagged
//! [`AccessRequirement`] makes supplying several structurally
//! impossible. Consumers still wired with four independently optional
//! lists go through [`AccessRequirement::from_parts`], which applies
//! the fixed precedence `all → any → groups → levels`.

use crate::engine::AuthEngine;
use crate::session::SessionStatus;
use crate::Permission;
use vcp_types::{PermissionGroup, PermissionLevel};

/// Default redirect target for anonymous sessions.
pub const DEFAULT_REDIRECT: &str = "/";

/// What a guarded route requires of the authenticated user.
///
/// Exactly one kind per guard. `None` means the route is public to
/// any authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessRequirement {
    /// No requirement beyond being authenticated.
    #[default]
    None,
    /// Every listed tag must be held. An empty list is trivially
    /// satisfied.
    AllPermissions(Vec<Permission>),
    /// At least one listed tag must be held. An empty list is
    /// unsatisfiable (fail closed).
    AnyPermission(Vec<Permission>),
    /// The user's group must be one of the listed groups. Exact
    /// match, no hierarchy climb.
    AnyGroup(Vec<PermissionGroup>),
    /// The user's level must be one of the listed levels.
    AnyLevel(Vec<PermissionLevel>),
}

impl AccessRequirement {
    /// Resolves four independently optional requirement lists into a
    /// single kind, by fixed precedence:
    /// `all → any → groups → levels`.
    ///
    /// Supplying more than one list is a consumer wiring mistake; the
    /// higher-precedence list wins and the rest are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use vcp_auth::{AccessRequirement, Permission};
    ///
    /// let req = AccessRequirement::from_parts(
    ///     Some(vec![Permission::ContentView]),
    ///     Some(vec![Permission::ReviewApprove]), // ignored: lower precedence
    ///     None,
    ///     None,
    /// );
    /// assert_eq!(req, AccessRequirement::AllPermissions(vec![Permission::ContentView]));
    ///
    /// assert_eq!(
    ///     AccessRequirement::from_parts(None, None, None, None),
    ///     AccessRequirement::None
    /// );
    /// ```
    #[must_use]
    pub fn from_parts(
        all: Option<Vec<Permission>>,
        any: Option<Vec<Permission>>,
        groups: Option<Vec<PermissionGroup>>,
        levels: Option<Vec<PermissionLevel>>,
    ) -> Self {
        if let Some(all) = all {
            Self::AllPermissions(all)
        } else if let Some(any) = any {
            Self::AnyPermission(any)
        } else if let Some(groups) = groups {
            Self::AnyGroup(groups)
        } else if let Some(levels) = levels {
            Self::AnyLevel(levels)
        } else {
            Self::None
        }
    }

    /// Evaluates this requirement against the engine's current user.
    ///
    /// Assumes the session is authenticated; the guard checks that
    /// first.
    #[must_use]
    pub fn is_satisfied(&self, engine: &AuthEngine) -> bool {
        match self {
            Self::None => true,
            Self::AllPermissions(permissions) => engine.has_all_permissions(permissions),
            Self::AnyPermission(permissions) => engine.has_any_permission(permissions),
            Self::AnyGroup(groups) => groups.iter().any(|g| engine.is_in_group(*g)),
            Self::AnyLevel(levels) => levels.iter().any(|l| engine.has_level(*l)),
        }
    }
}

/// The outcome of one guard evaluation.
///
/// Denial is a normal outcome, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected content.
    Render,
    /// Session still resolving; render a loading indicator.
    Loading,
    /// Anonymous session; navigate to the given path.
    Redirect(String),
    /// Requirement failed; render the supplied fallback view.
    Fallback(String),
    /// Requirement failed and no fallback was supplied; render the
    /// generic access-denied notice.
    AccessDenied,
}

/// Guard for one protected route or view.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vcp_auth::{
///     AccessRequirement, AuthEngine, MemorySessionStore, RouteDecision, RouteGuard,
///     StaticIdentityProvider,
/// };
/// use vcp_types::{PermissionLevel, User, UserId};
///
/// let creator = User::new(
///     UserId::new(),
///     "creator@example.com",
///     "Creator",
///     PermissionLevel::ContentCreator,
///     "Example Motors",
/// );
/// let engine = AuthEngine::new(
///     Arc::new(StaticIdentityProvider::new()),
///     Arc::new(MemorySessionStore::with_user(creator)),
/// );
/// engine.restore();
///
/// let admin_only = RouteGuard::new(AccessRequirement::AnyLevel(vec![
///     PermissionLevel::Admin,
///     PermissionLevel::ServiceManager,
/// ]));
/// assert_eq!(admin_only.decide(&engine), RouteDecision::AccessDenied);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    requirement: AccessRequirement,
    redirect_to: String,
    fallback: Option<String>,
}

impl RouteGuard {
    /// Creates a guard with the given requirement, the default
    /// redirect target, and no fallback view.
    #[must_use]
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            redirect_to: DEFAULT_REDIRECT.to_string(),
            fallback: None,
        }
    }

    /// Creates a guard with no requirement: public to any
    /// authenticated user (anonymous sessions still redirect).
    #[must_use]
    pub fn public() -> Self {
        Self::new(AccessRequirement::None)
    }

    /// Sets the redirect target for anonymous sessions.
    #[must_use]
    pub fn with_redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// Sets the fallback view rendered when the requirement fails.
    #[must_use]
    pub fn with_fallback(mut self, view: impl Into<String>) -> Self {
        self.fallback = Some(view.into());
        self
    }

    /// Returns the guard's requirement.
    #[must_use]
    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    /// Evaluates the guard against the engine's current state.
    #[must_use]
    pub fn decide(&self, engine: &AuthEngine) -> RouteDecision {
        match engine.status() {
            // Do not redirect before the startup restore or an
            // in-flight login resolves.
            SessionStatus::Uninitialized | SessionStatus::Loading => RouteDecision::Loading,
            SessionStatus::Anonymous => {
                tracing::debug!(redirect_to = %self.redirect_to, "guard: anonymous, redirecting");
                RouteDecision::Redirect(self.redirect_to.clone())
            }
            SessionStatus::Authenticated => {
                if self.requirement.is_satisfied(engine) {
                    RouteDecision::Render
                } else {
                    tracing::debug!(requirement = ?self.requirement, "guard: requirement not met");
                    match &self.fallback {
                        Some(view) => RouteDecision::Fallback(view.clone()),
                        None => RouteDecision::AccessDenied,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySessionStore, StaticIdentityProvider};
    use std::sync::Arc;
    use vcp_types::{User, UserId};

    fn user(level: PermissionLevel) -> User {
        User::new(
            UserId::new(),
            "user@example.com",
            "Test User",
            level,
            "Example Motors",
        )
    }

    fn engine_with(user: Option<User>) -> AuthEngine {
        let store = match user {
            Some(u) => MemorySessionStore::with_user(u),
            None => MemorySessionStore::new(),
        };
        let engine = AuthEngine::new(Arc::new(StaticIdentityProvider::new()), Arc::new(store));
        engine.restore();
        engine
    }

    #[test]
    fn uninitialized_session_shows_loading() {
        let engine = AuthEngine::new(
            Arc::new(StaticIdentityProvider::new()),
            Arc::new(MemorySessionStore::new()),
        );
        // No restore() yet.
        let guard = RouteGuard::public();
        assert_eq!(guard.decide(&engine), RouteDecision::Loading);
    }

    #[test]
    fn anonymous_redirects_to_default() {
        let engine = engine_with(None);
        let guard = RouteGuard::new(AccessRequirement::AllPermissions(vec![
            Permission::ContentView,
        ]));
        assert_eq!(
            guard.decide(&engine),
            RouteDecision::Redirect(DEFAULT_REDIRECT.to_string())
        );
    }

    #[test]
    fn anonymous_redirects_regardless_of_requirement() {
        let engine = engine_with(None);
        for guard in [
            RouteGuard::public(),
            RouteGuard::new(AccessRequirement::AnyPermission(vec![])),
            RouteGuard::new(AccessRequirement::AnyGroup(vec![PermissionGroup::Business])),
        ] {
            assert_eq!(
                guard.decide(&engine),
                RouteDecision::Redirect(DEFAULT_REDIRECT.to_string())
            );
        }
    }

    #[test]
    fn anonymous_redirects_to_configured_target() {
        let engine = engine_with(None);
        let guard = RouteGuard::public().with_redirect_to("/login");
        assert_eq!(
            guard.decide(&engine),
            RouteDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn no_requirement_renders_for_authenticated() {
        let engine = engine_with(Some(user(PermissionLevel::ContentCreator)));
        assert_eq!(RouteGuard::public().decide(&engine), RouteDecision::Render);
    }

    #[test]
    fn level_requirement_denies_without_fallback() {
        // ContentCreator hitting an Admin/ServiceManager route: generic
        // denial notice, no redirect.
        let engine = engine_with(Some(user(PermissionLevel::ContentCreator)));
        let guard = RouteGuard::new(AccessRequirement::AnyLevel(vec![
            PermissionLevel::Admin,
            PermissionLevel::ServiceManager,
        ]));
        assert_eq!(guard.decide(&engine), RouteDecision::AccessDenied);
    }

    #[test]
    fn denial_prefers_supplied_fallback() {
        let engine = engine_with(Some(user(PermissionLevel::Modeler)));
        let guard = RouteGuard::new(AccessRequirement::AllPermissions(vec![
            Permission::UserManage,
        ]))
        .with_fallback("upgrade-notice");
        assert_eq!(
            guard.decide(&engine),
            RouteDecision::Fallback("upgrade-notice".to_string())
        );
    }

    #[test]
    fn group_requirement_is_exact_match() {
        // Management is not automatically privileged over a
        // Production-only route.
        let engine = engine_with(Some(user(PermissionLevel::Admin)));
        let guard = RouteGuard::new(AccessRequirement::AnyGroup(vec![
            PermissionGroup::Production,
        ]));
        assert_eq!(guard.decide(&engine), RouteDecision::AccessDenied);
    }

    #[test]
    fn all_permissions_route_renders_when_held() {
        let engine = engine_with(Some(user(PermissionLevel::BusinessUser)));
        let guard = RouteGuard::new(AccessRequirement::AllPermissions(vec![
            Permission::ReviewView,
            Permission::ReviewApprove,
        ]));
        assert_eq!(guard.decide(&engine), RouteDecision::Render);
    }

    #[test]
    fn empty_all_requirement_renders() {
        let engine = engine_with(Some(user(PermissionLevel::ContentCreator)));
        let guard = RouteGuard::new(AccessRequirement::AllPermissions(vec![]));
        assert_eq!(guard.decide(&engine), RouteDecision::Render);
    }

    #[test]
    fn empty_any_requirement_denies() {
        let engine = engine_with(Some(user(PermissionLevel::Admin)));
        let guard = RouteGuard::new(AccessRequirement::AnyPermission(vec![]));
        assert_eq!(guard.decide(&engine), RouteDecision::AccessDenied);
    }

    #[test]
    fn from_parts_precedence_order() {
        let all = vec![Permission::ContentView];
        let any = vec![Permission::ReviewApprove];
        let groups = vec![PermissionGroup::Business];
        let levels = vec![PermissionLevel::Admin];

        assert_eq!(
            AccessRequirement::from_parts(
                Some(all.clone()),
                Some(any.clone()),
                Some(groups.clone()),
                Some(levels.clone()),
            ),
            AccessRequirement::AllPermissions(all)
        );
        assert_eq!(
            AccessRequirement::from_parts(
                None,
                Some(any.clone()),
                Some(groups.clone()),
                Some(levels.clone()),
            ),
            AccessRequirement::AnyPermission(any)
        );
        assert_eq!(
            AccessRequirement::from_parts(None, None, Some(groups.clone()), Some(levels.clone())),
            AccessRequirement::AnyGroup(groups)
        );
        assert_eq!(
            AccessRequirement::from_parts(None, None, None, Some(levels.clone())),
            AccessRequirement::AnyLevel(levels)
        );
        assert_eq!(
            AccessRequirement::from_parts(None, None, None, None),
            AccessRequirement::None
        );
    }

    #[test]
    fn default_requirement_is_none() {
        assert_eq!(AccessRequirement::default(), AccessRequirement::None);
    }
}
