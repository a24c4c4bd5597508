//! Configuration loading.
//!
//! Priority: environment (`HISMARKETING_API_URL`) > config.toml > defaults.
//! The file is created with defaults on first use so users can find and
//! edit it.

use std::path::PathBuf;

use hismarketing_core::config::ClientConfig;
use hismarketing_core::error::{HisError, Result};

use crate::paths::HisPaths;
use crate::storage::AtomicTomlFile;

pub const API_URL_ENV: &str = "HISMARKETING_API_URL";

pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(paths: &HisPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| HisError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the configuration, writing a default file when none exists,
    /// then applies environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = match self.file.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = ClientConfig::default();
                if let Err(e) = self.file.save(&config) {
                    // A read-only config dir must not prevent the client from running
                    tracing::warn!(
                        path = %self.file.path().display(),
                        "[ConfigService] Could not write default config: {}",
                        e
                    );
                }
                config
            }
            Err(e) => {
                return Err(HisError::config(format!(
                    "{}: {}",
                    self.file.path().display(),
                    e
                )));
            }
        };

        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        tracing::debug!("[ConfigService] {} overrides api.base_url", API_URL_ENV);
        config.api.base_url = url.trim().to_string();
    }
    config
}
