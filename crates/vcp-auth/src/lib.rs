//! Authorization core for the VCP admin platform.
//!
//! This crate is the single decision layer for "what can the current
//! user see and do" on the client. It trusts the identity assertion
//! handed to it by the identity provider; it does not verify
//! credentials cryptographically and it is not a substitute for
//! server-side enforcement.
//!
//! # Model
//!
//! ```text
//! Render Decision = Session(WHO) ∩ Matrix(Level → Permissions) ∩ Requirement(Guard)
//! ```
//!
//! | Layer | Type | Controls |
//! |-------|------|----------|
//! | [`Permission`] | Enum | The atomic capability tags that exist |
//! | [`matrix`] | Static table | Which level holds which tags |
//! | [`AuthEngine`] | Struct | Who is logged in; answers every check |
//! | [`RouteGuard`] | Struct | Render / redirect / fallback decision |
//!
//! # Crate Architecture
//!
//! ```text
//! vcp-types   (UserId, ProjectId, User, PermissionLevel, PermissionGroup)
//!     ↑
//! vcp-auth    ◄── THIS CRATE
//!     ├── permission   capability catalog (pure data)
//!     ├── matrix       level → permission set (pure lookup)
//!     ├── session      process-wide session state machine
//!     ├── store        persisted session (one JSON record)
//!     ├── provider     identity-provider boundary (async)
//!     ├── engine       the single source of truth for checks
//!     └── guard        route/render decision
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed** — no user means no permission; unknown inputs
//!   deny; an empty "any-of" requirement is unsatisfiable.
//! - **No default grant** — a new capability grants nothing until the
//!   matrix names it for a level.
//! - **Single evaluation point** — [`AuthEngine::has_permission`] is
//!   the only place permission bits are tested; everything else
//!   composes it.

pub mod engine;
pub mod error;
pub mod guard;
pub mod matrix;
pub mod permission;
pub mod provider;
pub mod session;
pub mod store;

pub use engine::AuthEngine;
pub use error::AuthError;
pub use guard::{AccessRequirement, RouteDecision, RouteGuard};
pub use matrix::{config_for, permissions_for, MatrixError, PermissionConfig};
pub use permission::Permission;
pub use provider::{IdentityProvider, StaticIdentityProvider};
pub use session::SessionStatus;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};

// Re-export the shared identity types for convenience.
pub use vcp_types::{PermissionGroup, PermissionLevel, ProjectId, User, UserId};
