//! The authenticated user record.

use crate::{PermissionGroup, PermissionLevel, ProjectId, UserId};
use serde::{Deserialize, Serialize};

/// A fully resolved user identity, as returned by the identity
/// provider and held in the session.
///
/// # Level/Group Consistency
///
/// `group` is always derivable from `level`. The public constructor
/// derives it, so a `User` built through [`User::new`] can never carry
/// a mismatched pair. The field is still stored (and serialized)
/// because downstream consumers key off the group directly; records
/// arriving from persistence must be re-checked with
/// [`is_consistent`](Self::is_consistent) before being trusted.
///
/// # Project Assignment
///
/// `assigned_projects` is meaningful only for the Production group.
/// Management and Business users have blanket project access and the
/// list is ignored for them. An absent list deserializes as empty,
/// which for Production means "no access" — deny by default.
///
/// # Example
///
/// ```
/// use vcp_types::{PermissionGroup, PermissionLevel, ProjectId, User, UserId};
///
/// let project = ProjectId::new();
/// let user = User::new(
///     UserId::new(),
///     "modeler@example.com",
///     "Kim Modeler",
///     PermissionLevel::Modeler,
///     "Example Motors",
/// )
/// .with_assigned_projects(vec![project]);
///
/// assert_eq!(user.group, PermissionGroup::Production);
/// assert!(user.is_consistent());
/// assert_eq!(user.assigned_projects, vec![project]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable account identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Fine-grained permission tier.
    pub level: PermissionLevel,
    /// Coarse tier; always the canonical group for `level`.
    pub group: PermissionGroup,
    /// Organization the user belongs to.
    pub organization: String,
    /// Projects this user is assigned to (Production group only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_projects: Vec<ProjectId>,
}

impl User {
    /// Creates a user, deriving the group from the level.
    #[must_use]
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        level: PermissionLevel,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            level,
            group: level.group(),
            organization: organization.into(),
            assigned_projects: Vec::new(),
        }
    }

    /// Sets the assigned project list.
    ///
    /// Only meaningful for Production users; for other groups the list
    /// is carried but never consulted.
    #[must_use]
    pub fn with_assigned_projects(mut self, projects: Vec<ProjectId>) -> Self {
        self.assigned_projects = projects;
        self
    }

    /// Returns `true` if `group` equals the canonical group for
    /// `level`.
    ///
    /// Deserialized records can disagree (hand-edited or stale
    /// persisted state); such records must be discarded, not repaired.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.group == self.level.group()
    }

    /// Returns `true` if this user is assigned to the given project.
    ///
    /// This is raw list membership; blanket group access is applied
    /// by the authorization engine, not here.
    #[must_use]
    pub fn is_assigned_to(&self, project: &ProjectId) -> bool {
        self.assigned_projects.contains(project)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.email, self.level)
    }
}
