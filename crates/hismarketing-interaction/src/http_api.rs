//! HttpSalesApi - REST client for the sales-analytics backend.
//!
//! Authenticated calls send the session token as a bearer credential. Any
//! non-2xx response becomes `HisError::Api`, carrying the body's `message`
//! field when the backend supplied one.

use async_trait::async_trait;
use hismarketing_core::analytics::{
    AnalysisResult, PredictionResult, ReportRequest, UploadFile, UploadResult,
};
use hismarketing_core::api::{AuthGrant, SalesApi};
use hismarketing_core::config::ApiSettings;
use hismarketing_core::error::{HisError, Result};
use hismarketing_core::session::{LoginCredentials, Registration};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const UPLOAD_PATH: &str = "/api/data/upload";
const ANALYZE_PATH: &str = "/api/data/analyze";
const PREDICT_PATH: &str = "/api/prediction/generate";
const REPORTS_PATH: &str = "/api/reports";

/// API Gateway implementation over HTTP.
#[derive(Clone)]
pub struct HttpSalesApi {
    client: Client,
    base_url: String,
}

impl HttpSalesApi {
    /// Creates a client for `base_url` without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), None)
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::build(settings.base_url.clone(), settings.timeout())
    }

    fn build(base_url: String, timeout: Option<std::time::Duration>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(HisError::config("api.base_url is empty"));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HisError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends `request` and returns the successful response.
    async fn send(&self, request: RequestBuilder, call: &'static str) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(call, "[HttpSalesApi] Request failed: {}", err);
            HisError::network(format!("{call} request failed: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(call, status = status.as_u16(), "[HttpSalesApi] Non-success response");
            return Err(map_http_error(status, &body));
        }

        tracing::debug!(call, status = status.as_u16(), "[HttpSalesApi] Response received");
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call: &'static str,
    ) -> Result<T> {
        let response = self.send(request, call).await?;
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                HisError::Serialization {
                    format: "JSON".to_string(),
                    message: format!("Failed to parse {call} response: {err}"),
                }
            } else {
                HisError::network(format!("Failed to read {call} response: {err}"))
            }
        })
    }
}

#[async_trait]
impl SalesApi for HttpSalesApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant> {
        let request = self.client.post(self.url(LOGIN_PATH)).json(credentials);
        self.send_json(request, "login").await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        let request = self.client.post(self.url(REGISTER_PATH)).json(registration);
        self.send_json(request, "register").await
    }

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResult> {
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(mime.essence_str())
            .map_err(|e| HisError::internal(format!("Invalid MIME type {mime}: {e}")))?;
        let form = Form::new().part("file", part);

        let request = self
            .client
            .post(self.url(UPLOAD_PATH))
            .bearer_auth(token)
            .multipart(form);
        self.send_json(request, "upload").await
    }

    async fn analyze(&self, token: &str, file_id: &str) -> Result<AnalysisResult> {
        let request = self
            .client
            .post(self.url(ANALYZE_PATH))
            .bearer_auth(token)
            .json(&FileRequest { file_id });
        self.send_json(request, "analyze").await
    }

    async fn predict(&self, token: &str, file_id: &str) -> Result<PredictionResult> {
        let request = self
            .client
            .post(self.url(PREDICT_PATH))
            .bearer_auth(token)
            .json(&FileRequest { file_id });
        self.send_json(request, "predict").await
    }

    async fn download_report(&self, token: &str, report: ReportRequest) -> Result<Vec<u8>> {
        let url = self.url(&format!("{}/{}", REPORTS_PATH, report.format.endpoint()));
        let request = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("type", report.kind.as_str())]);

        let response = self.send(request, "report").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| HisError::network(format!("Failed to read report body: {err}")))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Serialize)]
struct FileRequest<'a> {
    file_id: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Builds the `Api` error for a non-2xx response; the JSON body's `message`
/// is kept verbatim when present.
fn map_http_error(status: StatusCode, body: &str) -> HisError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|wrapper| wrapper.message)
        .filter(|message| !message.trim().is_empty());

    HisError::api(status.as_u16(), message)
}
