use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File format of a downloadable report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    /// Path segment under `/api/reports/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
        }
    }

    /// Extension of the saved file, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    /// Report type used when the caller does not pick one.
    pub fn default_kind(self) -> ReportKind {
        match self {
            ReportFormat::Pdf => ReportKind::Analysis,
            ReportFormat::Excel => ReportKind::Prediction,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(format!("Unknown report format: {other}")),
        }
    }
}

/// Which stored result the server renders into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Analysis,
    Prediction,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Analysis => "analysis",
            ReportKind::Prediction => "prediction",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "analysis" => Ok(ReportKind::Analysis),
            "prediction" => Ok(ReportKind::Prediction),
            other => Err(format!("Unknown report type: {other}")),
        }
    }
}

/// A report download: `GET /api/reports/{format}?type={kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportRequest {
    pub format: ReportFormat,
    pub kind: ReportKind,
}

impl ReportRequest {
    pub fn new(format: ReportFormat, kind: ReportKind) -> Self {
        Self { format, kind }
    }

    /// Request with the format's default report type.
    pub fn with_default_kind(format: ReportFormat) -> Self {
        Self::new(format, format.default_kind())
    }

    /// `{prefix}_{type}_raporu.{ext}`
    pub fn file_name(&self, app_prefix: &str) -> String {
        format!(
            "{}_{}_raporu.{}",
            app_prefix,
            self.kind.as_str(),
            self.format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_pattern() {
        let pdf = ReportRequest::new(ReportFormat::Pdf, ReportKind::Analysis);
        assert_eq!(pdf.file_name("hismarketing"), "hismarketing_analysis_raporu.pdf");

        let excel = ReportRequest::new(ReportFormat::Excel, ReportKind::Prediction);
        assert_eq!(
            excel.file_name("hismarketing"),
            "hismarketing_prediction_raporu.xlsx"
        );
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(
            ReportRequest::with_default_kind(ReportFormat::Pdf).kind,
            ReportKind::Analysis
        );
        assert_eq!(
            ReportRequest::with_default_kind(ReportFormat::Excel).kind,
            ReportKind::Prediction
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("PDF".parse::<ReportFormat>(), Ok(ReportFormat::Pdf));
        assert_eq!("xlsx".parse::<ReportFormat>(), Ok(ReportFormat::Excel));
        assert!("docx".parse::<ReportFormat>().is_err());
        assert_eq!("prediction".parse::<ReportKind>(), Ok(ReportKind::Prediction));
        assert!("summary".parse::<ReportKind>().is_err());
    }
}
