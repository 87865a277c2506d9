//! The permission catalog: every atomic capability in the platform.
//!
//! Pure data — a closed set of capability tags grouped by domain.
//! A tag has no behavior of its own; it only gains meaning when the
//! matrix ([`crate::matrix`]) names it for a level.
//!
//! # No Default Grant
//!
//! Adding a capability here grants it to nobody. Every level that
//! should hold the new tag must be extended in the matrix explicitly,
//! so a forgotten entry fails closed instead of silently escalating.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An atomic, named capability a user may or may not hold.
///
/// The canonical string form is `domain.action` (e.g. `project.view`),
/// which is also the serde representation.
///
/// # Example
///
/// ```
/// use vcp_auth::Permission;
///
/// assert_eq!(Permission::ProjectView.as_str(), "project.view");
/// assert_eq!(Permission::parse("review.approve"), Some(Permission::ReviewApprove));
/// assert_eq!(Permission::ContentDelete.domain(), "content");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// View projects and their dashboards.
    ProjectView,
    /// Create new production projects.
    ProjectCreate,
    /// Edit project metadata and configuration.
    ProjectEdit,
    /// Delete projects.
    ProjectDelete,

    /// View vehicle content items.
    ContentView,
    /// Create content items.
    ContentCreate,
    /// Edit content items.
    ContentEdit,
    /// Delete content items.
    ContentDelete,

    /// View vehicle shape data.
    ShapeView,
    /// Edit vehicle shape data.
    ShapeEdit,

    /// View review queues and review history.
    ReviewView,
    /// Approve a submitted item.
    ReviewApprove,
    /// Reject a submitted item.
    ReviewReject,

    /// View production status boards.
    StatusView,
    /// Change an item's production status.
    StatusChange,

    /// View team rosters.
    TeamView,
    /// Manage team membership and roles.
    TeamManage,

    /// View user accounts.
    UserView,
    /// Create, edit, and deactivate user accounts.
    UserManage,

    /// Change platform-wide settings.
    SystemSettings,
    /// Read the audit log.
    SystemAudit,
}

impl Permission {
    /// Every capability tag, grouped by domain.
    pub const ALL: &'static [Self] = &[
        Self::ProjectView,
        Self::ProjectCreate,
        Self::ProjectEdit,
        Self::ProjectDelete,
        Self::ContentView,
        Self::ContentCreate,
        Self::ContentEdit,
        Self::ContentDelete,
        Self::ShapeView,
        Self::ShapeEdit,
        Self::ReviewView,
        Self::ReviewApprove,
        Self::ReviewReject,
        Self::StatusView,
        Self::StatusChange,
        Self::TeamView,
        Self::TeamManage,
        Self::UserView,
        Self::UserManage,
        Self::SystemSettings,
        Self::SystemAudit,
    ];

    /// Returns the canonical `domain.action` string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectView => "project.view",
            Self::ProjectCreate => "project.create",
            Self::ProjectEdit => "project.edit",
            Self::ProjectDelete => "project.delete",
            Self::ContentView => "content.view",
            Self::ContentCreate => "content.create",
            Self::ContentEdit => "content.edit",
            Self::ContentDelete => "content.delete",
            Self::ShapeView => "shape.view",
            Self::ShapeEdit => "shape.edit",
            Self::ReviewView => "review.view",
            Self::ReviewApprove => "review.approve",
            Self::ReviewReject => "review.reject",
            Self::StatusView => "status.view",
            Self::StatusChange => "status.change",
            Self::TeamView => "team.view",
            Self::TeamManage => "team.manage",
            Self::UserView => "user.view",
            Self::UserManage => "user.manage",
            Self::SystemSettings => "system.settings",
            Self::SystemAudit => "system.audit",
        }
    }

    /// Returns the domain portion of the tag (e.g. `"project"`).
    #[must_use]
    pub fn domain(self) -> &'static str {
        // as_str always contains a dot.
        match self.as_str().split_once('.') {
            Some((domain, _)) => domain,
            None => self.as_str(),
        }
    }

    /// Parses a canonical tag string (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use vcp_auth::Permission;
    ///
    /// assert_eq!(Permission::parse("PROJECT.VIEW"), Some(Permission::ProjectView));
    /// assert_eq!(Permission::parse("project.nuke"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.iter().find(|p| p.as_str() == name).copied()
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| de::Error::custom(format!("unknown permission: {s}")))
    }
}
