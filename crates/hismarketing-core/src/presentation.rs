//! Presentation Layer contract.
//!
//! The orchestrator never renders anything itself; it reports state changes
//! and results to a [`Presenter`], which borrows the result data read-only.

use std::time::Duration;

use crate::analytics::{AnalysisResult, PredictionResult, UploadResult};
use crate::session::Session;

/// Views the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Public landing page (after logout)
    Landing,
    /// Login form
    Login,
    /// Authenticated dashboard (upload page)
    Dashboard,
    /// Analysis results page
    Analysis,
    /// Prediction page
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// How a notice is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeStyle {
    /// Hidden automatically after the given duration
    Transient(Duration),
    /// Stays until the user acknowledges it
    Blocking,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub style: NoticeStyle,
    pub message: String,
}

impl Notice {
    pub fn transient(level: NoticeLevel, message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            level,
            style: NoticeStyle::Transient(dismiss_after),
            message: message.into(),
        }
    }

    pub fn blocking_error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            style: NoticeStyle::Blocking,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Receives every UI-facing effect of the workflow.
///
/// Methods are synchronous and must not block: they are called from timer
/// tasks as well as from the stage continuations.
pub trait Presenter: Send + Sync {
    fn notice(&self, notice: Notice);

    fn redirect(&self, view: View);

    /// Signed-in user shown in the dashboard header.
    fn show_user(&self, _session: &Session) {}

    /// Upload progress indicator, `percent` in `0..=100`.
    fn upload_progress(&self, percent: u8, label: &str);

    /// Restores the upload area to its pre-upload state.
    fn reset_upload(&self);

    fn show_upload(&self, result: &UploadResult);

    fn show_analysis(&self, result: &AnalysisResult);

    /// Label of the prediction action control.
    fn prediction_status(&self, label: &str);

    /// Enables or disables the prediction action control.
    fn prediction_action_enabled(&self, enabled: bool);

    fn show_prediction(&self, result: &PredictionResult);

    /// A report was saved under `location`.
    fn report_saved(&self, _file_name: &str, _location: &str) {}
}
