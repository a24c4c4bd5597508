pub mod auth;
pub mod run;
pub mod shell;

use std::process::ExitCode;

use hismarketing_core::analytics::{ReportFormat, ReportKind, ReportRequest};
use hismarketing_core::error::Result as HisResult;

/// Converts a workflow outcome into an exit code.
///
/// Failures have already been shown to the user as notices or redirects.
pub fn exit_code<T>(outcome: HisResult<T>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("[CLI] Command failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Parses `pdf`, `excel`, or `<format>:<kind>` (e.g. `pdf:prediction`).
pub fn parse_report(value: &str) -> Result<ReportRequest, String> {
    let (format, kind) = match value.split_once(':') {
        Some((format, kind)) => (format, Some(kind)),
        None => (value, None),
    };

    let format: ReportFormat = format.trim().parse()?;
    match kind {
        Some(kind) => {
            let kind: ReportKind = kind.trim().parse()?;
            Ok(ReportRequest::new(format, kind))
        }
        None => Ok(ReportRequest::with_default_kind(format)),
    }
}
