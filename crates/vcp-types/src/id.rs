//! Identifier types for VCP.
//!
//! All identifiers are UUID-based so that records can move between
//! the admin client, exported reports, and backend services without
//! renumbering.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a user account.
///
/// # Example
///
/// ```
/// use vcp_types::UserId;
///
/// let a = UserId::new();
/// let b = UserId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random (UUID v4) user id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    ///
    /// Use this when the id comes from the identity provider rather
    /// than being minted locally.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a content-production project.
///
/// Projects are the unit of assignment for production-side users:
/// a modeler or content creator only sees the projects they are
/// assigned to, while management and business tiers see everything.
///
/// # Example
///
/// ```
/// use vcp_types::ProjectId;
///
/// let p = ProjectId::new();
/// assert_eq!(p, ProjectId::from_uuid(p.uuid()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new random (UUID v4) project id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_unique() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = ProjectId::from_uuid(uuid);
        assert_eq!(id.uuid(), uuid);
    }

    #[test]
    fn display_is_plain_uuid() {
        let id = UserId::new();
        assert_eq!(id.to_string(), id.uuid().to_string());
    }

    #[test]
    fn serde_is_transparent() {
        let id = ProjectId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        // Serializes as a bare UUID string, not a wrapper object.
        assert_eq!(json, format!("\"{}\"", id.uuid()));

        let parsed: ProjectId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
