//! Path management for client configuration, session and log files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/hismarketing/      # Config directory
//! ├── config.toml              # Client configuration
//! └── session.toml             # Persisted session (userToken, userName, userEmail)
//!
//! ~/.local/share/hismarketing/ # Data directory
//! └── logs/                    # Daily-rolling log files
//! ```
//!
//! Setting `HISMARKETING_HOME` (or passing a root override) places both
//! trees under that single directory instead.

use std::path::PathBuf;

const APP_NAME: &str = "hismarketing";
const HOME_ENV: &str = "HISMARKETING_HOME";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file location used by the client.
#[derive(Debug, Clone, Default)]
pub struct HisPaths {
    root_override: Option<PathBuf>,
}

impl HisPaths {
    /// Creates a resolver. `root_override` wins over `HISMARKETING_HOME`,
    /// which wins over the platform directories.
    pub fn new(root_override: Option<PathBuf>) -> Self {
        let root_override =
            root_override.or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from));
        Self { root_override }
    }

    /// Returns the configuration directory (e.g. `~/.config/hismarketing/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/hismarketing/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token; the session store restricts it to the
    /// owner on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }

    /// Default directory for saved reports: the platform download directory,
    /// falling back to `<data_dir>/reports`.
    pub fn default_report_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.join("reports"));
        }
        match dirs::download_dir() {
            Some(dir) => Ok(dir),
            None => Ok(self.data_dir()?.join("reports")),
        }
    }
}
