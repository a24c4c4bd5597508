//! Per-run workflow state.

use std::fmt;

use hismarketing_core::analytics::{AnalysisResult, PredictionResult, UploadResult};
use hismarketing_core::session::Session;
use uuid::Uuid;

/// Where a pipeline stands in the auth → upload → analyze → predict flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineState {
    Unauthenticated,
    Authenticated,
    Uploaded,
    Analyzed,
    Predicted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Unauthenticated => "unauthenticated",
            PipelineState::Authenticated => "authenticated",
            PipelineState::Uploaded => "uploaded",
            PipelineState::Analyzed => "analyzed",
            PipelineState::Predicted => "predicted",
        };
        f.write_str(name)
    }
}

/// Results collected by one run of the workflow.
///
/// A stage result only exists when every earlier stage has one. Storing a
/// new result discards everything downstream of it, so an analysis always
/// belongs to the current upload and a prediction to the current analysis.
#[derive(Debug, Clone)]
pub struct Pipeline {
    id: Uuid,
    generation: u64,
    session: Option<Session>,
    upload: Option<UploadResult>,
    analysis: Option<AnalysisResult>,
    prediction: Option<PredictionResult>,
}

impl Pipeline {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation,
            session: None,
            upload: None,
            analysis: None,
            prediction: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> PipelineState {
        if self.session.is_none() {
            PipelineState::Unauthenticated
        } else if self.prediction.is_some() {
            PipelineState::Predicted
        } else if self.analysis.is_some() {
            PipelineState::Analyzed
        } else if self.upload.is_some() {
            PipelineState::Uploaded
        } else {
            PipelineState::Authenticated
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn upload(&self) -> Option<&UploadResult> {
        self.upload.as_ref()
    }

    pub fn file_id(&self) -> Option<&str> {
        self.upload.as_ref().map(|upload| upload.file_id.as_str())
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    /// Attaches a session. A different token starts the run over.
    pub(crate) fn authenticate(&mut self, session: Session) {
        let same_token = self
            .session
            .as_ref()
            .is_some_and(|current| current.token == session.token);
        if !same_token {
            self.clear_results();
        }
        self.session = Some(session);
    }

    pub(crate) fn sign_out(&mut self) {
        self.session = None;
        self.clear_results();
    }

    pub(crate) fn set_upload(&mut self, upload: UploadResult) {
        self.upload = Some(upload);
        self.analysis = None;
        self.prediction = None;
    }

    pub(crate) fn set_analysis(&mut self, analysis: AnalysisResult) {
        debug_assert!(self.upload.is_some());
        self.analysis = Some(analysis);
        self.prediction = None;
    }

    pub(crate) fn set_prediction(&mut self, prediction: PredictionResult) {
        debug_assert!(self.analysis.is_some());
        self.prediction = Some(prediction);
    }

    fn clear_results(&mut self) {
        self.upload = None;
        self.analysis = None;
        self.prediction = None;
    }
}
