//! Wires the layers together for one CLI invocation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use hismarketing_application::WorkflowOrchestrator;
use hismarketing_core::config::{ClientConfig, PacingSettings};
use hismarketing_infrastructure::{ConfigService, DirectoryReportSink, HisPaths, TomlSessionStore};
use hismarketing_interaction::HttpSalesApi;

use crate::terminal::TerminalPresenter;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub home: Option<PathBuf>,
    pub api_url: Option<String>,
    pub report_dir: Option<PathBuf>,
}

/// Resolved paths and configuration.
pub struct Settings {
    pub paths: HisPaths,
    pub config: ClientConfig,
}

impl Settings {
    /// Loads `config.toml` and applies environment and flag overrides.
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let paths = HisPaths::new(options.home.clone());
        let mut config = ConfigService::new(&paths)?.load()?;

        if let Some(url) = options.api_url.as_deref().filter(|url| !url.trim().is_empty()) {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(dir) = &options.report_dir {
            config.reports.output_dir = Some(dir.clone());
        }

        Ok(Self { paths, config })
    }

    pub fn report_dir(&self) -> Result<PathBuf> {
        match &self.config.reports.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => self
                .paths
                .default_report_dir()
                .context("Cannot determine report directory"),
        }
    }
}

/// Everything a command needs to drive the workflow.
pub struct AppContext {
    pub settings: Settings,
    pub orchestrator: Arc<WorkflowOrchestrator>,
}

impl AppContext {
    /// Builds the orchestrator. `immediate` drops all cosmetic delays.
    pub fn build(settings: Settings, immediate: bool) -> Result<Self> {
        let api = HttpSalesApi::from_settings(&settings.config.api)?;
        let store = TomlSessionStore::new(&settings.paths)?;
        let reports = DirectoryReportSink::new(settings.report_dir()?);

        let pacing = if immediate {
            PacingSettings {
                notice_dismiss_ms: settings.config.pacing.notice_dismiss_ms,
                ..PacingSettings::immediate()
            }
        } else {
            settings.config.pacing.clone()
        };

        tracing::debug!(
            base_url = %api.base_url(),
            reports = %reports.dir().display(),
            immediate,
            "[AppContext] Ready"
        );

        let orchestrator = WorkflowOrchestrator::with_pacing(
            Arc::new(api),
            Arc::new(store),
            Arc::new(TerminalPresenter::new()),
            Arc::new(reports),
            pacing,
        )
        .with_app_prefix(settings.config.reports.app_prefix.clone());

        Ok(Self {
            settings,
            orchestrator: Arc::new(orchestrator),
        })
    }
}
