//! The permission matrix: which level holds which capability tags.
//!
//! Pure, total lookup `level → PermissionConfig`. Lookups cannot fail:
//! the input is a closed enum and the match is exhaustive, so an
//! out-of-range level is unrepresentable rather than a runtime case.
//!
//! # Hierarchy
//!
//! Levels form a non-strict hierarchy: Admin's set is a superset of
//! every other level's. This is a data invariant checked by
//! [`validate`] (recommended as a startup assertion) and pinned by
//! tests, not something the type system enforces.
//!
//! | Level | Grants |
//! |-------|--------|
//! | Admin | everything |
//! | ServiceManager | everything except user management and system settings |
//! | BusinessUser | viewing, review decisions, status changes |
//! | Modeler | content and shape production on assigned projects |
//! | ContentCreator | content production on assigned projects |

use crate::Permission;
use thiserror::Error;
use vcp_types::{PermissionGroup, PermissionLevel};

/// The matrix row for one permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionConfig {
    /// The level this row describes.
    pub level: PermissionLevel,
    /// Canonical group for the level.
    pub group: PermissionGroup,
    /// Every capability tag the level holds.
    pub permissions: &'static [Permission],
    /// Human-readable summary for admin tooling.
    pub description: &'static str,
}

static ADMIN: PermissionConfig = PermissionConfig {
    level: PermissionLevel::Admin,
    group: PermissionGroup::Management,
    permissions: Permission::ALL,
    description: "Full platform administration, including user accounts and system settings",
};

static SERVICE_MANAGER: PermissionConfig = PermissionConfig {
    level: PermissionLevel::ServiceManager,
    group: PermissionGroup::Management,
    permissions: &[
        Permission::ProjectView,
        Permission::ProjectCreate,
        Permission::ProjectEdit,
        Permission::ProjectDelete,
        Permission::ContentView,
        Permission::ContentCreate,
        Permission::ContentEdit,
        Permission::ContentDelete,
        Permission::ShapeView,
        Permission::ShapeEdit,
        Permission::ReviewView,
        Permission::ReviewApprove,
        Permission::ReviewReject,
        Permission::StatusView,
        Permission::StatusChange,
        Permission::TeamView,
        Permission::TeamManage,
        Permission::UserView,
        Permission::SystemAudit,
    ],
    description: "Runs production services and teams; no account or settings administration",
};

static BUSINESS_USER: PermissionConfig = PermissionConfig {
    level: PermissionLevel::BusinessUser,
    group: PermissionGroup::Business,
    permissions: &[
        Permission::ProjectView,
        Permission::ContentView,
        Permission::ShapeView,
        Permission::ReviewView,
        Permission::ReviewApprove,
        Permission::ReviewReject,
        Permission::StatusView,
        Permission::StatusChange,
        Permission::TeamView,
    ],
    description: "Business stakeholder: reviews submissions and tracks production status",
};

static MODELER: PermissionConfig = PermissionConfig {
    level: PermissionLevel::Modeler,
    group: PermissionGroup::Production,
    permissions: &[
        Permission::ProjectView,
        Permission::ContentView,
        Permission::ContentCreate,
        Permission::ContentEdit,
        Permission::ShapeView,
        Permission::ShapeEdit,
        Permission::StatusView,
    ],
    description: "Builds vehicle shape data on assigned projects",
};

static CONTENT_CREATOR: PermissionConfig = PermissionConfig {
    level: PermissionLevel::ContentCreator,
    group: PermissionGroup::Production,
    permissions: &[
        Permission::ProjectView,
        Permission::ContentView,
        Permission::ContentCreate,
        Permission::ContentEdit,
        Permission::ShapeView,
        Permission::StatusView,
    ],
    description: "Produces vehicle content on assigned projects",
};

/// Returns the matrix row for a level. Total; never fails.
///
/// # Example
///
/// ```
/// use vcp_auth::{config_for, Permission};
/// use vcp_types::PermissionLevel;
///
/// let config = config_for(PermissionLevel::Modeler);
/// assert!(config.permissions.contains(&Permission::ShapeEdit));
/// assert!(!config.permissions.contains(&Permission::UserManage));
/// ```
#[must_use]
pub fn config_for(level: PermissionLevel) -> &'static PermissionConfig {
    match level {
        PermissionLevel::Admin => &ADMIN,
        PermissionLevel::ServiceManager => &SERVICE_MANAGER,
        PermissionLevel::BusinessUser => &BUSINESS_USER,
        PermissionLevel::Modeler => &MODELER,
        PermissionLevel::ContentCreator => &CONTENT_CREATOR,
    }
}

/// Returns the capability tags a level holds. Total; never fails.
#[must_use]
pub fn permissions_for(level: PermissionLevel) -> &'static [Permission] {
    config_for(level).permissions
}

/// A violated matrix invariant, found by [`validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// A level's row claims the wrong level (copy/paste drift).
    #[error("matrix row for {expected} is labeled {actual}")]
    WrongLevel {
        /// The level used for the lookup.
        expected: PermissionLevel,
        /// The level stored in the row.
        actual: PermissionLevel,
    },

    /// A row's group disagrees with the canonical level → group mapping.
    #[error("matrix row for {level} has group {actual}, canonical group is {expected}")]
    GroupMismatch {
        /// The row's level.
        level: PermissionLevel,
        /// The canonical group for that level.
        expected: PermissionGroup,
        /// The group stored in the row.
        actual: PermissionGroup,
    },

    /// A level holds no permissions at all.
    #[error("matrix row for {level} grants no permissions")]
    EmptySet {
        /// The offending level.
        level: PermissionLevel,
    },

    /// A tag appears twice in one row.
    #[error("matrix row for {level} grants {permission} more than once")]
    DuplicateGrant {
        /// The offending level.
        level: PermissionLevel,
        /// The duplicated tag.
        permission: Permission,
    },

    /// A non-admin level holds a tag Admin does not.
    #[error("{level} grants {permission}, which Admin does not hold")]
    ExceedsAdmin {
        /// The offending level.
        level: PermissionLevel,
        /// The tag missing from Admin's set.
        permission: Permission,
    },
}

/// Checks every matrix invariant.
///
/// Intended as a startup assertion (and a test), not a per-call
/// guard: the matrix is static data, so one check covers the process
/// lifetime.
///
/// # Errors
///
/// Returns the first [`MatrixError`] found.
pub fn validate() -> Result<(), MatrixError> {
    let admin_set = permissions_for(PermissionLevel::Admin);

    for level in PermissionLevel::ALL {
        let config = config_for(*level);

        if config.level != *level {
            return Err(MatrixError::WrongLevel {
                expected: *level,
                actual: config.level,
            });
        }

        if config.group != level.group() {
            return Err(MatrixError::GroupMismatch {
                level: *level,
                expected: level.group(),
                actual: config.group,
            });
        }

        if config.permissions.is_empty() {
            return Err(MatrixError::EmptySet { level: *level });
        }

        let mut seen = std::collections::HashSet::new();
        for permission in config.permissions {
            if !seen.insert(permission) {
                return Err(MatrixError::DuplicateGrant {
                    level: *level,
                    permission: *permission,
                });
            }
            if !admin_set.contains(permission) {
                return Err(MatrixError::ExceedsAdmin {
                    level: *level,
                    permission: *permission,
                });
            }
        }
    }

    Ok(())
}
