//! Analytics domain module.
//!
//! Result payloads of the pipeline stages and the report request model.
//!
//! # Module Structure
//!
//! - `upload`: Upload input, file-type validation and `UploadResult`
//! - `analysis`: `AnalysisResult` and its rows
//! - `prediction`: `PredictionResult`, six-month forecasts, recommendations
//! - `report`: Report formats, types and file naming
//! - `format`: Display helpers (currency, quantities, month labels)

mod analysis;
pub mod format;
mod prediction;
mod report;
mod upload;

pub use analysis::{AnalysisResult, MonthlySale, ProductProfit, TopProduct};
pub use prediction::{
    DataSummary, FORECAST_MONTHS, FutureMonth, PredictionResult, Priority, ProductForecast,
    Recommendation,
};
pub use report::{ReportFormat, ReportKind, ReportRequest};
pub use upload::{
    ALLOWED_EXTENSIONS, UploadFile, UploadResult, file_extension, validate_file_name,
};
