//! Client configuration model (`config.toml`).
//!
//! Every section has defaults, so a missing or partial file still yields a
//! complete configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_APP_PREFIX: &str = "hismarketing";

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub pacing: PacingSettings,
    #[serde(default)]
    pub reports: ReportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL the `/api/...` paths are appended to
    pub base_url: String,
    /// Whole-request timeout; `0` disables it
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Perceived-latency constants of the workflow.
///
/// None of these influence the real requests; they only shape what the
/// user sees while a request is in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    /// Upload progress step, in percent
    pub progress_step_percent: u8,
    /// Interval between upload progress steps
    pub progress_interval_ms: u64,
    /// Highest simulated progress before the response arrives
    pub progress_ceiling_percent: u8,
    /// How long 100% stays visible before the upload result is revealed
    pub progress_hold_ms: u64,
    /// Minimum time the prediction stage stays pending
    pub prediction_min_latency_ms: u64,
    /// Interval between prediction status messages
    pub status_rotation_ms: u64,
    /// How long the completion label stays visible before the forecast is shown
    pub prediction_done_hold_ms: u64,
    /// Auto-dismiss delay of transient notices
    pub notice_dismiss_ms: u64,
    /// Delay between a successful login and the dashboard redirect
    pub auth_redirect_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            progress_step_percent: 10,
            progress_interval_ms: 200,
            progress_ceiling_percent: 90,
            progress_hold_ms: 500,
            prediction_min_latency_ms: 3000,
            status_rotation_ms: 1500,
            prediction_done_hold_ms: 500,
            notice_dismiss_ms: 5000,
            auth_redirect_ms: 1500,
        }
    }
}

impl PacingSettings {
    /// All delays zero, progress unchanged. Used by non-interactive runs.
    pub fn immediate() -> Self {
        Self {
            progress_hold_ms: 0,
            prediction_min_latency_ms: 0,
            prediction_done_hold_ms: 0,
            auth_redirect_ms: 0,
            ..Self::default()
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn progress_hold(&self) -> Duration {
        Duration::from_millis(self.progress_hold_ms)
    }

    pub fn prediction_min_latency(&self) -> Duration {
        Duration::from_millis(self.prediction_min_latency_ms)
    }

    pub fn status_rotation(&self) -> Duration {
        Duration::from_millis(self.status_rotation_ms)
    }

    pub fn prediction_done_hold(&self) -> Duration {
        Duration::from_millis(self.prediction_done_hold_ms)
    }

    pub fn notice_dismiss(&self) -> Duration {
        Duration::from_millis(self.notice_dismiss_ms)
    }

    pub fn auth_redirect(&self) -> Duration {
        Duration::from_millis(self.auth_redirect_ms)
    }
}

/// Report download settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Leading part of saved report file names
    pub app_prefix: String,
    /// Directory reports are saved to; the platform download directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            app_prefix: DEFAULT_APP_PREFIX.to_string(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
