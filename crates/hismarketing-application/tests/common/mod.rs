//! Shared fakes for the application tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hismarketing_application::WorkflowOrchestrator;
use hismarketing_core::analytics::{
    AnalysisResult, PredictionResult, ProductForecast, ReportRequest, UploadFile, UploadResult,
};
use hismarketing_core::api::{AuthGrant, SalesApi};
use hismarketing_core::config::PacingSettings;
use hismarketing_core::error::{HisError, Result};
use hismarketing_core::presentation::{Notice, Presenter, View};
use hismarketing_core::report_sink::ReportSink;
use hismarketing_core::session::{LoginCredentials, Registration, Session, SessionStore};
use hismarketing_infrastructure::MemorySessionStore;

// ============================================================================
// Backend
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login { email: String },
    Register { email: String },
    Upload { token: String, file_name: String },
    Analyze { token: String, file_id: String },
    Predict { token: String, file_id: String },
    Report { token: String, request: ReportRequest },
}

/// Responses for one endpoint: queued results first, then the fallback.
struct Script<T> {
    queue: VecDeque<Result<T>>,
    fallback: Result<T>,
    delay: Duration,
}

impl<T: Clone> Script<T> {
    fn new(fallback: Result<T>) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback,
            delay: Duration::ZERO,
        }
    }

    fn next(&mut self) -> (Result<T>, Duration) {
        let result = self.queue.pop_front().unwrap_or_else(|| self.fallback.clone());
        (result, self.delay)
    }
}

pub struct MockApi {
    calls: Mutex<Vec<Call>>,
    auth: Mutex<Script<AuthGrant>>,
    upload: Mutex<Script<UploadResult>>,
    analyze: Mutex<Script<AnalysisResult>>,
    predict: Mutex<Script<PredictionResult>>,
    report: Mutex<Script<Vec<u8>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            auth: Mutex::new(Script::new(Ok(AuthGrant {
                token: "tok-1".to_string(),
                name: Some("Ayşe".to_string()),
            }))),
            upload: Mutex::new(Script::new(Ok(upload_result("f1")))),
            analyze: Mutex::new(Script::new(Ok(analysis_result()))),
            predict: Mutex::new(Script::new(Ok(prediction_result()))),
            report: Mutex::new(Script::new(Ok(b"%PDF-1.4".to_vec()))),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn fail_auth(&self, err: HisError) {
        self.auth.lock().unwrap().fallback = Err(err);
    }

    pub fn queue_upload(&self, result: Result<UploadResult>) {
        self.upload.lock().unwrap().queue.push_back(result);
    }

    pub fn upload_delay(&self, delay: Duration) {
        self.upload.lock().unwrap().delay = delay;
    }

    pub fn fail_analyze(&self, err: HisError) {
        self.analyze.lock().unwrap().fallback = Err(err);
    }

    pub fn analyze_delay(&self, delay: Duration) {
        self.analyze.lock().unwrap().delay = delay;
    }

    pub fn fail_predict(&self, err: HisError) {
        self.predict.lock().unwrap().fallback = Err(err);
    }

    pub fn predict_delay(&self, delay: Duration) {
        self.predict.lock().unwrap().delay = delay;
    }

    pub fn fail_report(&self, err: HisError) {
        self.report.lock().unwrap().fallback = Err(err);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn respond<T>((result, delay): (Result<T>, Duration)) -> Result<T> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    result
}

#[async_trait]
impl SalesApi for MockApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant> {
        self.record(Call::Login {
            email: credentials.email.clone(),
        });
        let next = self.auth.lock().unwrap().next();
        respond(next).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        self.record(Call::Register {
            email: registration.email.clone(),
        });
        let next = self.auth.lock().unwrap().next();
        respond(next).await
    }

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResult> {
        self.record(Call::Upload {
            token: token.to_string(),
            file_name: file.file_name.clone(),
        });
        let next = self.upload.lock().unwrap().next();
        respond(next).await
    }

    async fn analyze(&self, token: &str, file_id: &str) -> Result<AnalysisResult> {
        self.record(Call::Analyze {
            token: token.to_string(),
            file_id: file_id.to_string(),
        });
        let next = self.analyze.lock().unwrap().next();
        respond(next).await
    }

    async fn predict(&self, token: &str, file_id: &str) -> Result<PredictionResult> {
        self.record(Call::Predict {
            token: token.to_string(),
            file_id: file_id.to_string(),
        });
        let next = self.predict.lock().unwrap().next();
        respond(next).await
    }

    async fn download_report(&self, token: &str, request: ReportRequest) -> Result<Vec<u8>> {
        self.record(Call::Report {
            token: token.to_string(),
            request,
        });
        let next = self.report.lock().unwrap().next();
        respond(next).await
    }
}

pub fn upload_result(file_id: &str) -> UploadResult {
    UploadResult {
        file_id: file_id.to_string(),
        row_count: 100,
        column_count: 5,
        detected_columns: vec!["date".to_string(), "product".to_string()],
        filename: Some("sales.csv".to_string()),
    }
}

pub fn analysis_result() -> AnalysisResult {
    AnalysisResult {
        total_revenue: 1_234_567.89,
        product_count: 2,
        ..AnalysisResult::default()
    }
}

pub fn prediction_result() -> PredictionResult {
    PredictionResult {
        accuracy: 84.5,
        predictions: vec![ProductForecast {
            product: "Defter".to_string(),
            monthly_predictions: [10.0, 12.0, 11.0, 9.0, 13.0, 15.0],
            total_predicted: None,
            accuracy: Some(84.5),
        }],
        ..PredictionResult::default()
    }
}

// ============================================================================
// Presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notice(Notice),
    Redirect(View),
    ShowUser(String),
    Progress(u8, String),
    ResetUpload,
    ShowUpload(String),
    ShowAnalysis,
    Status(String),
    ActionEnabled(bool),
    ShowPrediction,
    ReportSaved(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn error_notices(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(Notice::is_error)
            .map(|notice| notice.message)
            .collect()
    }

    pub fn redirects(&self) -> Vec<View> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Redirect(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Progress(percent, _) => Some(percent),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Status(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, expected: &Event) -> bool {
        self.events().iter().any(|event| event == expected)
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn notice(&self, notice: Notice) {
        self.push(Event::Notice(notice));
    }

    fn redirect(&self, view: View) {
        self.push(Event::Redirect(view));
    }

    fn show_user(&self, session: &Session) {
        self.push(Event::ShowUser(session.display_name().to_string()));
    }

    fn upload_progress(&self, percent: u8, label: &str) {
        self.push(Event::Progress(percent, label.to_string()));
    }

    fn reset_upload(&self) {
        self.push(Event::ResetUpload);
    }

    fn show_upload(&self, result: &UploadResult) {
        self.push(Event::ShowUpload(result.file_id.clone()));
    }

    fn show_analysis(&self, _result: &AnalysisResult) {
        self.push(Event::ShowAnalysis);
    }

    fn prediction_status(&self, label: &str) {
        self.push(Event::Status(label.to_string()));
    }

    fn prediction_action_enabled(&self, enabled: bool) {
        self.push(Event::ActionEnabled(enabled));
    }

    fn show_prediction(&self, _result: &PredictionResult) {
        self.push(Event::ShowPrediction);
    }

    fn report_saved(&self, file_name: &str, _location: &str) {
        self.push(Event::ReportSaved(file_name.to_string()));
    }
}

// ============================================================================
// Report sink
// ============================================================================

#[derive(Default)]
pub struct MemoryReportSink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    fail: Mutex<bool>,
}

impl MemoryReportSink {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

impl ReportSink for MemoryReportSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if *self.fail.lock().unwrap() {
            return Err(HisError::io("disk full"));
        }
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("/reports").join(file_name))
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub api: Arc<MockApi>,
    pub store: Arc<MemorySessionStore>,
    pub presenter: Arc<RecordingPresenter>,
    pub reports: Arc<MemoryReportSink>,
    pub orchestrator: Arc<WorkflowOrchestrator>,
}

impl Harness {
    /// Real pacing values; use with a paused clock.
    pub fn paced() -> Self {
        Self::build(PacingSettings::default(), None)
    }

    /// No holds or latency floors.
    pub fn immediate() -> Self {
        Self::build(PacingSettings::immediate(), None)
    }

    /// Immediate pacing with a stored session.
    pub fn signed_in() -> Self {
        Self::build(
            PacingSettings::immediate(),
            Some(Session::new("tok-1", "Ayşe", "ayse@example.com")),
        )
    }

    /// Default pacing with a stored session.
    pub fn signed_in_paced() -> Self {
        Self::build(
            PacingSettings::default(),
            Some(Session::new("tok-1", "Ayşe", "ayse@example.com")),
        )
    }

    fn build(pacing: PacingSettings, session: Option<Session>) -> Self {
        let api = Arc::new(MockApi::default());
        let store = Arc::new(match session {
            Some(session) => MemorySessionStore::with_session(session),
            None => MemorySessionStore::new(),
        });
        let presenter = Arc::new(RecordingPresenter::default());
        let reports = Arc::new(MemoryReportSink::default());
        let orchestrator = Arc::new(WorkflowOrchestrator::with_pacing(
            api.clone(),
            store.clone(),
            presenter.clone(),
            reports.clone(),
            pacing,
        ));
        Self {
            api,
            store,
            presenter,
            reports,
            orchestrator,
        }
    }

    pub fn stored_session(&self) -> Option<Session> {
        self.store.load().unwrap()
    }
}

pub fn csv_file() -> UploadFile {
    UploadFile::new("sales.csv", b"date,product,quantity\n2024-01-01,Defter,3\n".to_vec())
}
