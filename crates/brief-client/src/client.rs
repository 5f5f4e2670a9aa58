//! HTTP client for the brief-generation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use brief_core::types::{BriefPayload, BriefRunRequest, DocumentReference, UploadResponse};
use brief_core::BriefConfig;

use crate::error::ClientError;

/// Remote operations the session orchestrator depends on.
///
/// The orchestrator holds a `dyn BriefService` so tests can substitute
/// in-memory implementations for the HTTP client.
#[async_trait]
pub trait BriefService: Send + Sync {
    /// Submit the accumulated context and return the structured brief.
    async fn run_brief(&self, request: &BriefRunRequest) -> Result<BriefPayload, ClientError>;

    /// Upload a supporting document and return the server-assigned reference.
    async fn upload_document(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<DocumentReference, ClientError>;
}

/// `BriefService` implementation over HTTP with JSON bodies.
#[derive(Clone)]
pub struct HttpBriefClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBriefClient {
    /// Create a client for the configured backend.
    pub fn new(config: &BriefConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BriefService for HttpBriefClient {
    async fn run_brief(&self, request: &BriefRunRequest) -> Result<BriefPayload, ClientError> {
        let url = format!("{}/briefs/run", self.base_url);
        debug!(
            turns = request.conversation.len(),
            documents = request.documents.len(),
            thread_id = request.thread_id.as_deref(),
            "submitting brief run"
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: BriefPayload = serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        debug!(
            thread_id = %payload.thread_id,
            follow_ups = payload.follow_up_questions.len(),
            "brief run settled"
        );
        Ok(payload)
    }

    async fn upload_document(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<DocumentReference, ClientError> {
        let url = format!("{}/uploads", self.base_url);
        debug!(file_name, bytes = content.len(), "uploading document");

        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UploadFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        Ok(parsed.document)
    }
}
