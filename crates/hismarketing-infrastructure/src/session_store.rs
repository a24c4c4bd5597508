//! Session store implementations.
//!
//! [`TomlSessionStore`] persists the session to `session.toml`;
//! [`MemorySessionStore`] keeps it for the life of the process.

use std::path::PathBuf;
use std::sync::RwLock;

use hismarketing_core::error::{HisError, Result};
use hismarketing_core::session::{Session, SessionStore};

use crate::paths::HisPaths;
use crate::storage::AtomicTomlFile;

/// Session store backed by an owner-only TOML file.
///
/// The file holds exactly `userToken`, `userName` and `userEmail`. A file
/// whose token is blank counts as no session.
pub struct TomlSessionStore {
    file: AtomicTomlFile<Session>,
}

impl TomlSessionStore {
    /// Creates a store at the default location (`<config_dir>/session.toml`).
    pub fn new(paths: &HisPaths) -> Result<Self> {
        let path = paths
            .session_file()
            .map_err(|e| HisError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl SessionStore for TomlSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let session = self.file.load()?;
        Ok(session.filter(Session::has_token))
    }

    fn save(&self, session: &Session) -> Result<()> {
        self.file.save(session)?;
        tracing::debug!(path = %self.file.path().display(), "[SessionStore] Session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::debug!(path = %self.file.path().display(), "[SessionStore] Session cleared");
        Ok(())
    }
}

/// Process-lifetime session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let guard = self
            .session
            .read()
            .map_err(|_| HisError::internal("session lock poisoned"))?;
        Ok(guard.clone().filter(Session::has_token))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| HisError::internal("session lock poisoned"))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| HisError::internal("session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
