//! # Remote Service
//!
//! HTTP client for the editor server endpoints.

use crate::assistant::ConversationHistory;
use crate::document::Mode;
use crate::protocol::{
    AiHelpRequest, AiHelpResponse, DocumentRequest, ErrorResponse, ExportFormat, LoadRequest,
    LoadResponse, PreviewResponse, SaveResponse,
};
use anyhow::{bail, Context, Result};
use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// File body returned by an export endpoint
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Name suggested by the server, if any
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// Client for the editor server
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Creating RemoteClient for {}", base_url);

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {path} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            bail!("{path} returned {}: {message}", status.as_u16());
        }

        Ok(response)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(path, body)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("Invalid response body from {path}"))
    }

    fn document(content: &str, mode: Mode) -> DocumentRequest {
        DocumentRequest {
            content: content.to_string(),
            mode,
        }
    }

    /// Rendered preview HTML
    pub async fn preview(&self, content: &str, mode: Mode) -> Result<String> {
        let response: PreviewResponse = self
            .post_json("/preview", &Self::document(content, mode))
            .await?;
        Ok(response.html)
    }

    pub async fn save(&self, content: &str, mode: Mode) -> Result<SaveResponse> {
        self.post_json("/save", &Self::document(content, mode)).await
    }

    pub async fn load(&self, mode: Mode) -> Result<String> {
        let response: LoadResponse = self.post_json("/load", &LoadRequest { mode }).await?;
        Ok(response.content)
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        content: &str,
        mode: Mode,
    ) -> Result<ExportedFile> {
        let response = self
            .send(format.path(), &Self::document(content, mode))
            .await?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename);
        let bytes = response
            .bytes()
            .await
            .context("Failed to read export body")?;

        tracing::debug!("Received {} export of {} bytes", format.extension(), bytes.len());
        Ok(ExportedFile { filename, bytes })
    }

    pub async fn ask(
        &self,
        question: &str,
        mode: Mode,
        history: ConversationHistory,
    ) -> Result<AiHelpResponse> {
        let request = AiHelpRequest {
            question: question.to_string(),
            mode,
            history,
        };
        self.post_json("/ai-help", &request).await
    }
}

/// File name from a `Content-Disposition` header, reduced to its last
/// path component
pub fn attachment_filename(disposition: &str) -> Option<String> {
    let raw = disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');

    Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
