//! API Gateway trait.
//!
//! Defines the backend contract the workflow relies on. The HTTP
//! implementation lives in `hismarketing-interaction`; tests use in-memory
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalysisResult, PredictionResult, ReportRequest, UploadFile, UploadResult};
use crate::error::Result;
use crate::session::{LoginCredentials, Registration};

/// Token issued by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    /// Display name, when the backend returns one
    #[serde(default)]
    pub name: Option<String>,
}

/// The backend sales-analytics API.
///
/// Every authenticated call takes the bearer token explicitly; the trait
/// carries no session state of its own.
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// `POST /api/auth/login`
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant>;

    /// `POST /api/auth/register`
    async fn register(&self, registration: &Registration) -> Result<AuthGrant>;

    /// `POST /api/data/upload` (multipart)
    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResult>;

    /// `POST /api/data/analyze`
    async fn analyze(&self, token: &str, file_id: &str) -> Result<AnalysisResult>;

    /// `POST /api/prediction/generate`
    async fn predict(&self, token: &str, file_id: &str) -> Result<PredictionResult>;

    /// `GET /api/reports/{format}?type={kind}`, returning the raw payload.
    async fn download_report(&self, token: &str, request: ReportRequest) -> Result<Vec<u8>>;
}
