//! Persisted session storage.
//!
//! A single serialized [`User`] record under one well-known location:
//! read once at startup, written on every successful login, deleted on
//! logout. Malformed data is reported as [`StoreError::Corrupt`] so
//! the engine can discard and purge it — corruption is recovered
//! locally, never fatal.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use vcp_types::User;

/// Session file name under the VCP data directory.
pub const SESSION_FILE: &str = "session.json";

/// Data directory name in the user's home.
pub const DATA_DIR: &str = ".vcp";

/// Error accessing the persisted session record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record exists but could not be read or written.
    #[error("session store I/O failed at {path}: {source}")]
    Io {
        /// Location of the record.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The record exists but does not deserialize to a `User`.
    #[error("persisted session at {path} is corrupt: {reason}")]
    Corrupt {
        /// Location of the record.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Storage for the single persisted session record.
///
/// Implementations must be `Send + Sync`; the engine shares them
/// behind an `Arc`.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Loads the persisted user, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] for unparseable data and
    /// [`StoreError::Io`] for read failures. A missing record is
    /// `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<User>, StoreError>;

    /// Persists the user, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the record cannot be written.
    fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Deletes the persisted record. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing record cannot be
    /// removed. A missing record is success.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store: one JSON record at a fixed path.
///
/// # Example
///
/// ```no_run
/// use vcp_auth::{FileSessionStore, SessionStore};
///
/// let store = FileSessionStore::at_default_path();
/// let restored = store.load();
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default path (`~/.vcp/session.json`).
    ///
    /// Falls back to the current directory when no home directory can
    /// be resolved.
    #[must_use]
    pub fn at_default_path() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(DATA_DIR).join(SESSION_FILE))
    }

    /// Returns the record's location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let user = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Some(user))
    }

    fn save(&self, user: &User) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        // serde_json cannot fail on User; map anyway rather than panic.
        let json = serde_json::to_string_pretty(user).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// In-memory store for tests and ephemeral clients.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<User>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a user, as if a previous run
    /// had persisted one.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self {
            slot: Mutex::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, user: &User) -> Result<(), StoreError> {
        *self.slot.lock() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vcp_types::{PermissionLevel, UserId};

    fn user() -> User {
        User::new(
            UserId::new(),
            "user@example.com",
            "Test User",
            PermissionLevel::BusinessUser,
            "Example Motors",
        )
    }

    #[test]
    fn file_store_missing_record_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp.path().join(SESSION_FILE));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_save_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp.path().join(SESSION_FILE));

        let u = user();
        store.save(&u).unwrap();
        assert_eq!(store.load().unwrap(), Some(u));
    }

    #[test]
    fn file_store_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp.path().join("nested").join("dir").join(SESSION_FILE));

        store.save(&user()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn file_store_corrupt_record_reports_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SESSION_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::new(&path);
        let err = store.load().expect_err("corrupt record must error");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp.path().join(SESSION_FILE));

        store.save(&user()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Already gone; still succeeds.
        store.clear().unwrap();
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        let u = user();
        store.save(&u).unwrap();
        assert_eq!(store.load().unwrap(), Some(u));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_preseeded() {
        let u = user();
        let store = MemorySessionStore::with_user(u.clone());
        assert_eq!(store.load().unwrap(), Some(u));
    }
}
