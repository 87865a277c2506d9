//! Permission tier enumerations.
//!
//! Two closed enumerations describe where a user sits in the
//! organization:
//!
//! - [`PermissionLevel`] — five fine-grained tiers. Every user has
//!   exactly one, fixed for the lifetime of a session.
//! - [`PermissionGroup`] — three coarse tiers, each a fixed,
//!   non-overlapping union of levels. Resource access rules (project
//!   assignment) are decided at group granularity.
//!
//! ```text
//! Management  = { Admin, ServiceManager }
//! Business    = { BusinessUser }
//! Production  = { Modeler, ContentCreator }
//! ```
//!
//! The level → group mapping is total and fixed at compile time:
//! [`PermissionLevel::group`] is an exhaustive `match`, so adding a
//! level without classifying it is a compile error.

use serde::{Deserialize, Serialize};

/// The five seniority tiers a user can hold.
///
/// Levels are mutually exclusive: a user has exactly one. What each
/// level is allowed to do is defined by the permission matrix in
/// `vcp-auth`, not here.
///
/// # Example
///
/// ```
/// use vcp_types::{PermissionLevel, PermissionGroup};
///
/// assert_eq!(PermissionLevel::Admin.group(), PermissionGroup::Management);
/// assert_eq!(PermissionLevel::Modeler.group(), PermissionGroup::Production);
/// assert_eq!(PermissionLevel::parse("modeler"), Some(PermissionLevel::Modeler));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionLevel {
    /// Full platform administration.
    Admin,
    /// Manages production services and teams.
    ServiceManager,
    /// Business-side stakeholder: reviews and status tracking.
    BusinessUser,
    /// Builds and edits vehicle shape data.
    Modeler,
    /// Produces and edits vehicle content.
    ContentCreator,
}

impl PermissionLevel {
    /// All levels, in seniority order.
    pub const ALL: &'static [Self] = &[
        Self::Admin,
        Self::ServiceManager,
        Self::BusinessUser,
        Self::Modeler,
        Self::ContentCreator,
    ];

    /// Returns the canonical group containing this level.
    ///
    /// The mapping is total: every level belongs to exactly one group.
    #[must_use]
    pub fn group(self) -> PermissionGroup {
        match self {
            Self::Admin | Self::ServiceManager => PermissionGroup::Management,
            Self::BusinessUser => PermissionGroup::Business,
            Self::Modeler | Self::ContentCreator => PermissionGroup::Production,
        }
    }

    /// Returns the canonical name of this level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ServiceManager => "service_manager",
            Self::BusinessUser => "business_user",
            Self::Modeler => "modeler",
            Self::ContentCreator => "content_creator",
        }
    }

    /// Parses a level name (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use vcp_types::PermissionLevel;
    ///
    /// assert_eq!(PermissionLevel::parse("ADMIN"), Some(PermissionLevel::Admin));
    /// assert_eq!(PermissionLevel::parse("service_manager"), Some(PermissionLevel::ServiceManager));
    /// assert_eq!(PermissionLevel::parse("intern"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "service_manager" => Some(Self::ServiceManager),
            "business_user" => Some(Self::BusinessUser),
            "modeler" => Some(Self::Modeler),
            "content_creator" => Some(Self::ContentCreator),
            _ => None,
        }
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three coarse tiers used for resource access rules.
///
/// Groups exist because project-level access is decided at a coarser
/// granularity than permissions: management and business tiers see
/// every project, production tiers only see assigned projects.
///
/// # Example
///
/// ```
/// use vcp_types::{PermissionGroup, PermissionLevel};
///
/// assert!(PermissionGroup::Management.has_blanket_project_access());
/// assert!(!PermissionGroup::Production.has_blanket_project_access());
/// assert_eq!(
///     PermissionGroup::Production.levels(),
///     &[PermissionLevel::Modeler, PermissionLevel::ContentCreator]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionGroup {
    /// Admin and ServiceManager.
    Management,
    /// BusinessUser.
    Business,
    /// Modeler and ContentCreator.
    Production,
}

impl PermissionGroup {
    /// All groups.
    pub const ALL: &'static [Self] = &[Self::Management, Self::Business, Self::Production];

    /// Returns the fixed set of levels in this group.
    #[must_use]
    pub fn levels(self) -> &'static [PermissionLevel] {
        match self {
            Self::Management => &[PermissionLevel::Admin, PermissionLevel::ServiceManager],
            Self::Business => &[PermissionLevel::BusinessUser],
            Self::Production => &[PermissionLevel::Modeler, PermissionLevel::ContentCreator],
        }
    }

    /// Returns `true` if members of this group can access every
    /// project without per-project assignment.
    ///
    /// Only Management and Business have blanket access. Anything
    /// else denies, so new groups start locked down until access is
    /// granted here explicitly.
    #[must_use]
    pub fn has_blanket_project_access(self) -> bool {
        match self {
            Self::Management | Self::Business => true,
            Self::Production => false,
        }
    }

    /// Returns the canonical name of this group.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Management => "management",
            Self::Business => "business",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for PermissionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_maps_to_exactly_one_group() {
        for level in PermissionLevel::ALL {
            let owners: Vec<_> = PermissionGroup::ALL
                .iter()
                .filter(|g| g.levels().contains(level))
                .collect();
            assert_eq!(owners.len(), 1, "level {level} must belong to one group");
            assert_eq!(*owners[0], level.group());
        }
    }

    #[test]
    fn groups_partition_all_levels() {
        let total: usize = PermissionGroup::ALL.iter().map(|g| g.levels().len()).sum();
        assert_eq!(total, PermissionLevel::ALL.len());
    }

    #[test]
    fn management_contains_admin_and_service_manager() {
        assert_eq!(PermissionLevel::Admin.group(), PermissionGroup::Management);
        assert_eq!(
            PermissionLevel::ServiceManager.group(),
            PermissionGroup::Management
        );
    }

    #[test]
    fn business_contains_business_user_only() {
        assert_eq!(
            PermissionGroup::Business.levels(),
            &[PermissionLevel::BusinessUser]
        );
    }

    #[test]
    fn production_has_no_blanket_access() {
        assert!(PermissionGroup::Management.has_blanket_project_access());
        assert!(PermissionGroup::Business.has_blanket_project_access());
        assert!(!PermissionGroup::Production.has_blanket_project_access());
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(
            PermissionLevel::parse("Admin"),
            Some(PermissionLevel::Admin)
        );
        assert_eq!(
            PermissionLevel::parse("CONTENT_CREATOR"),
            Some(PermissionLevel::ContentCreator)
        );
        assert_eq!(PermissionLevel::parse(""), None);
        assert_eq!(PermissionLevel::parse("superuser"), None);
    }

    #[test]
    fn as_str_parse_roundtrip() {
        for level in PermissionLevel::ALL {
            assert_eq!(PermissionLevel::parse(level.as_str()), Some(*level));
        }
    }

    #[test]
    fn serde_roundtrip() {
        for level in PermissionLevel::ALL {
            let json = serde_json::to_string(level).expect("serialize");
            let parsed: PermissionLevel = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(parsed, *level);
        }
    }
}
