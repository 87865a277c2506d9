//! Core identity types for the VCP admin platform.
//!
//! This crate holds the vocabulary shared by every other VCP crate:
//! identifiers, the [`User`] record, and the permission tier
//! enumerations ([`PermissionLevel`], [`PermissionGroup`]).
//!
//! # Crate Architecture
//!
//! ```text
//! vcp-types  (UserId, ProjectId, User, PermissionLevel, PermissionGroup)
//!     ↑
//! vcp-auth   (Permission catalog, matrix, engine, guard — uses vcp-types)
//! ```
//!
//! # Design Principles
//!
//! - **Identity, not authority** — this crate describes *who* a user is
//!   and which tier they belong to. What that tier is allowed to do
//!   lives in `vcp-auth` (the permission matrix).
//! - **Closed enumerations** — levels and groups are fixed, exhaustive
//!   enums. Adding a tier is a source change, never a runtime event.
//! - **No level/group drift** — a [`User`] built through the public
//!   constructor cannot carry a group that disagrees with its level.

pub mod id;
pub mod level;
pub mod user;

pub use id::{ProjectId, UserId};
pub use level::{PermissionGroup, PermissionLevel};
pub use user::User;
