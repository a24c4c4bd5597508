//! Workflow orchestrator.
//!
//! This module provides the `WorkflowOrchestrator` which drives a
//! [`Pipeline`] through upload, analysis and prediction, and downloads
//! reports. Every stage passes through the [`SessionGuard`] first, reports
//! progress through the [`Presenter`] and surfaces failures as notices.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hismarketing_core::analytics::{ReportRequest, UploadFile, validate_file_name};
use hismarketing_core::api::SalesApi;
use hismarketing_core::config::{DEFAULT_APP_PREFIX, PacingSettings};
use hismarketing_core::error::{HisError, Result};
use hismarketing_core::presentation::{Notice, Presenter, View};
use hismarketing_core::report_sink::ReportSink;
use hismarketing_core::session::{LoginCredentials, Registration, Session, SessionStore};

use crate::messages;
use crate::pipeline::{Pipeline, PipelineState};
use crate::session_guard::SessionGuard;
use crate::timers::{spawn_progress_ticker, spawn_status_rotator, with_min_latency};

/// Coordinates the client workflow against the backend.
///
/// # Staleness
///
/// Each pipeline records the orchestrator generation it was created in.
/// [`WorkflowOrchestrator::abandon`] advances the generation; a stage whose
/// pipeline is no longer current discards its response instead of storing or
/// presenting it, and returns [`HisError::Stale`].
///
/// # Thread Safety
///
/// All collaborators are shared trait objects, so the orchestrator can be
/// wrapped in an `Arc` and driven from several tasks.
pub struct WorkflowOrchestrator {
    api: Arc<dyn SalesApi>,
    guard: SessionGuard,
    presenter: Arc<dyn Presenter>,
    reports: Arc<dyn ReportSink>,
    pacing: PacingSettings,
    app_prefix: String,
    generation: AtomicU64,
}

impl WorkflowOrchestrator {
    /// Creates an orchestrator with default pacing.
    ///
    /// # Arguments
    ///
    /// * `api` - Backend gateway
    /// * `store` - Persisted session storage
    /// * `presenter` - Receives notices, redirects, progress and results
    /// * `reports` - Destination for downloaded report files
    pub fn new(
        api: Arc<dyn SalesApi>,
        store: Arc<dyn SessionStore>,
        presenter: Arc<dyn Presenter>,
        reports: Arc<dyn ReportSink>,
    ) -> Self {
        Self::with_pacing(api, store, presenter, reports, PacingSettings::default())
    }

    pub fn with_pacing(
        api: Arc<dyn SalesApi>,
        store: Arc<dyn SessionStore>,
        presenter: Arc<dyn Presenter>,
        reports: Arc<dyn ReportSink>,
        pacing: PacingSettings,
    ) -> Self {
        let guard = SessionGuard::new(api.clone(), store, presenter.clone(), pacing.clone());
        Self {
            api,
            guard,
            presenter,
            reports,
            pacing,
            app_prefix: DEFAULT_APP_PREFIX.to_string(),
            generation: AtomicU64::new(0),
        }
    }

    /// Sets the prefix used in saved report file names.
    pub fn with_app_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.trim().is_empty() {
            self.app_prefix = prefix;
        }
        self
    }

    pub fn session_guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub fn pacing(&self) -> &PacingSettings {
        &self.pacing
    }

    // ============================================================================
    // Pipeline lifecycle
    // ============================================================================

    /// Starts a new, unauthenticated pipeline in the current generation.
    pub fn new_pipeline(&self) -> Pipeline {
        Pipeline::new(self.generation.load(Ordering::SeqCst))
    }

    /// Abandons every existing pipeline.
    ///
    /// Stages still in flight finish their request but drop the response.
    pub fn abandon(&self) {
        let previous = self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(generation = previous + 1, "[Orchestrator] Pipelines abandoned");
    }

    pub fn is_current(&self, pipeline: &Pipeline) -> bool {
        pipeline.generation() == self.generation.load(Ordering::SeqCst)
    }

    fn ensure_current(&self, pipeline: &Pipeline, stage: &str) -> Result<()> {
        if self.is_current(pipeline) {
            return Ok(());
        }
        tracing::debug!(
            pipeline_id = %pipeline.id(),
            stage,
            "[Orchestrator] Discarding response for abandoned pipeline"
        );
        Err(HisError::Stale {
            pipeline_id: pipeline.id().to_string(),
        })
    }

    // ============================================================================
    // Authentication
    // ============================================================================

    pub async fn login(
        &self,
        pipeline: &mut Pipeline,
        credentials: &LoginCredentials,
    ) -> Result<PipelineState> {
        let session = self.guard.login(credentials).await?;
        pipeline.authenticate(session);
        Ok(pipeline.state())
    }

    pub async fn register(
        &self,
        pipeline: &mut Pipeline,
        registration: &Registration,
    ) -> Result<PipelineState> {
        let session = self.guard.register(registration).await?;
        pipeline.authenticate(session);
        Ok(pipeline.state())
    }

    pub fn logout(&self, pipeline: &mut Pipeline) -> Result<PipelineState> {
        pipeline.sign_out();
        self.guard.logout()?;
        Ok(pipeline.state())
    }

    /// Opens the dashboard: requires a session and shows the user's
    /// name and email.
    pub fn open_dashboard(&self, pipeline: &mut Pipeline) -> Result<Session> {
        let session = self.authorize(pipeline)?;
        self.presenter.show_user(&session);
        Ok(session)
    }

    /// Entry point of the login and register views.
    ///
    /// With a stored session the user is sent straight to the dashboard and
    /// the session is returned; `None` means the form should be shown.
    pub fn enter_auth_view(&self, pipeline: &mut Pipeline) -> Option<Session> {
        let session = self.guard.redirect_if_authenticated()?;
        pipeline.authenticate(session.clone());
        self.presenter.show_user(&session);
        Some(session)
    }

    /// Loads the stored session into the pipeline, or redirects to login.
    fn authorize(&self, pipeline: &mut Pipeline) -> Result<Session> {
        match self.guard.require_session() {
            Ok(session) => {
                pipeline.authenticate(session.clone());
                Ok(session)
            }
            Err(err) => {
                pipeline.sign_out();
                Err(err)
            }
        }
    }

    // ============================================================================
    // Upload
    // ============================================================================

    /// Uploads a spreadsheet for analysis.
    ///
    /// The extension is checked before any request is made. While the
    /// request is pending a simulated progress bar advances; on success it
    /// jumps to 100%, holds briefly, and the upload summary is shown.
    pub async fn upload(&self, pipeline: &mut Pipeline, file: UploadFile) -> Result<PipelineState> {
        let session = self.authorize(pipeline)?;
        self.check_file_name(&file.file_name)?;
        self.send_upload(pipeline, &session, file).await
    }

    /// Reads `path` and uploads it.
    ///
    /// The name is validated before the file is read.
    pub async fn upload_path(&self, pipeline: &mut Pipeline, path: &Path) -> Result<PipelineState> {
        let session = self.authorize(pipeline)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        self.check_file_name(&file_name)?;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), "[Orchestrator] Cannot read upload: {}", e);
                self.presenter
                    .notice(Notice::blocking_error(messages::file_read_failed(&e.to_string())));
                return Err(e.into());
            }
        };

        self.send_upload(pipeline, &session, UploadFile::new(file_name, bytes))
            .await
    }

    fn check_file_name(&self, file_name: &str) -> Result<()> {
        validate_file_name(file_name).map_err(|err| {
            tracing::debug!("[Orchestrator] Upload rejected locally: {}", err);
            self.presenter
                .notice(Notice::blocking_error(messages::UNSUPPORTED_FILE));
            HisError::from(err)
        })
    }

    async fn send_upload(
        &self,
        pipeline: &mut Pipeline,
        session: &Session,
        file: UploadFile,
    ) -> Result<PipelineState> {
        tracing::info!(
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "[Orchestrator] Uploading"
        );

        let ticker = spawn_progress_ticker(self.presenter.clone(), &self.pacing);
        let outcome = self.api.upload(&session.token, &file).await;
        ticker.stop().await;

        self.ensure_current(pipeline, "upload")?;

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("[Orchestrator] Upload failed: {}", err);
                self.presenter.notice(Notice::blocking_error(format!(
                    "{}{}",
                    messages::UPLOAD_ERROR_PREFIX,
                    err.user_message(messages::UPLOAD_FAILED)
                )));
                self.presenter.reset_upload();
                return Err(err);
            }
        };

        self.presenter.upload_progress(100, messages::UPLOAD_COMPLETE);
        sleep_for(self.pacing.progress_hold()).await;
        self.ensure_current(pipeline, "upload")?;

        tracing::info!(
            file_id = %result.file_id,
            rows = result.row_count,
            columns = result.column_count,
            "[Orchestrator] Upload complete"
        );
        self.presenter.show_upload(&result);
        pipeline.set_upload(result);
        Ok(pipeline.state())
    }

    // ============================================================================
    // Analysis
    // ============================================================================

    /// Analyzes the uploaded file and switches to the analysis view.
    pub async fn analyze(&self, pipeline: &mut Pipeline) -> Result<PipelineState> {
        let session = self.authorize(pipeline)?;

        let Some(file_id) = pipeline.file_id().map(str::to_string) else {
            self.presenter
                .notice(Notice::blocking_error(messages::UPLOAD_REQUIRED));
            return Err(HisError::missing_stage("upload"));
        };

        tracing::info!(file_id = %file_id, "[Orchestrator] Analyzing");
        let outcome = self.api.analyze(&session.token, &file_id).await;
        self.ensure_current(pipeline, "analyze")?;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    products = result.product_count,
                    "[Orchestrator] Analysis complete"
                );
                self.presenter.show_analysis(&result);
                self.presenter.redirect(View::Analysis);
                pipeline.set_analysis(result);
                Ok(pipeline.state())
            }
            Err(err) => {
                tracing::warn!("[Orchestrator] Analysis failed: {}", err);
                self.presenter.notice(Notice::blocking_error(format!(
                    "{}{}",
                    messages::ANALYSIS_ERROR_PREFIX,
                    err.user_message(messages::ANALYSIS_FAILED)
                )));
                Err(err)
            }
        }
    }

    // ============================================================================
    // Prediction
    // ============================================================================

    /// Generates the six-month forecast for the analyzed file.
    ///
    /// The prediction action is disabled and its status label rotates while
    /// the request is pending. The call takes at least
    /// `prediction_min_latency`, and the action is restored on every exit except
    /// for an abandoned pipeline.
    pub async fn predict(&self, pipeline: &mut Pipeline) -> Result<PipelineState> {
        let session = self.authorize(pipeline)?;

        let file_id = match (pipeline.analysis(), pipeline.file_id()) {
            (Some(_), Some(file_id)) => file_id.to_string(),
            _ => {
                self.presenter
                    .notice(Notice::blocking_error(messages::ANALYSIS_REQUIRED));
                return Err(HisError::missing_stage("analysis"));
            }
        };

        tracing::info!(file_id = %file_id, "[Orchestrator] Generating prediction");

        let mut restore = PredictionActionReset::engage(self.presenter.clone());
        let rotator = spawn_status_rotator(
            self.presenter.clone(),
            &messages::PREDICTION_STATUSES,
            self.pacing.status_rotation(),
        );
        let outcome = with_min_latency(
            self.pacing.prediction_min_latency(),
            self.api.predict(&session.token, &file_id),
        )
        .await;
        rotator.stop().await;

        self.ensure_current(pipeline, "predict")
            .inspect_err(|_| restore.disarm())?;

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("[Orchestrator] Prediction failed: {}", err);
                self.presenter.notice(Notice::blocking_error(format!(
                    "{}{}",
                    messages::PREDICTION_ERROR_PREFIX,
                    err.user_message(messages::PREDICTION_FAILED)
                )));
                return Err(err);
            }
        };

        self.presenter.prediction_status(messages::PREDICTION_DONE);
        sleep_for(self.pacing.prediction_done_hold()).await;
        self.ensure_current(pipeline, "predict")
            .inspect_err(|_| restore.disarm())?;

        tracing::info!(
            products = result.predictions.len(),
            recommendations = result.recommendations.len(),
            "[Orchestrator] Prediction complete"
        );
        self.presenter.show_prediction(&result);
        pipeline.set_prediction(result);
        Ok(pipeline.state())
    }

    // ============================================================================
    // Reports
    // ============================================================================

    /// Downloads a report and saves it through the report sink.
    ///
    /// Only a session is required; the pipeline is not modified. Any
    /// failure produces exactly one error notice.
    pub async fn download_report(
        &self,
        pipeline: &mut Pipeline,
        request: ReportRequest,
    ) -> Result<std::path::PathBuf> {
        let session = self.authorize(pipeline)?;
        let failure = messages::report_failed(request.format);

        tracing::info!(
            format = %request.format,
            kind = %request.kind,
            "[Orchestrator] Downloading report"
        );

        let bytes = match self.api.download_report(&session.token, request).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("[Orchestrator] Report download failed: {}", err);
                self.presenter.notice(Notice::blocking_error(failure));
                return Err(err);
            }
        };

        let file_name = request.file_name(&self.app_prefix);
        match self.reports.save(&file_name, &bytes) {
            Ok(path) => {
                self.presenter
                    .report_saved(&file_name, &path.display().to_string());
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(file_name = %file_name, "[Orchestrator] Report save failed: {}", err);
                self.presenter.notice(Notice::blocking_error(failure));
                Err(err)
            }
        }
    }
}

/// Disables the prediction action and puts it back when dropped.
///
/// A disarmed reset leaves the view alone; used once the pipeline that owns
/// the view has been abandoned.
struct PredictionActionReset {
    presenter: Arc<dyn Presenter>,
    armed: bool,
}

impl PredictionActionReset {
    fn engage(presenter: Arc<dyn Presenter>) -> Self {
        presenter.prediction_action_enabled(false);
        Self {
            presenter,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PredictionActionReset {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.presenter.prediction_status(messages::PREDICTION_IDLE);
        self.presenter.prediction_action_enabled(true);
    }
}

async fn sleep_for(duration: std::time::Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
