//! Minimal DeepL client: write/rephrase, translate, usage.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteRequest {
    pub text: Vec<String>,
    pub target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writing_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub text: Vec<String>,
    pub target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
}

/// One result entry; DeepL uses the same shape for improvements and
/// translations.
#[derive(Debug, Clone, Deserialize)]
pub struct TextResult {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    improvements: Vec<TextResult>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TextResult>,
}

/// Failure talking to DeepL.
#[derive(Debug)]
pub enum UpstreamError {
    /// DeepL answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The request failed or the body was not the expected JSON.
    Request(String),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Status { status, .. } => write!(f, "DeepL returned HTTP {status}"),
            UpstreamError::Request(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for UpstreamError {}

#[derive(Debug, Clone)]
pub struct DeeplClient {
    base_url: String,
    http: reqwest::Client,
}

impl DeeplClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build DeepL HTTP client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Returns the first improvement, if any.
    pub async fn rephrase(
        &self,
        key: &str,
        request: &WriteRequest,
    ) -> Result<Option<TextResult>, UpstreamError> {
        let response: WriteResponse = self
            .send(self.http.post(self.url("/v2/write/rephrase")).json(request), key)
            .await?;
        Ok(response.improvements.into_iter().next())
    }

    /// Returns the first translation, if any.
    pub async fn translate(
        &self,
        key: &str,
        request: &TranslateRequest,
    ) -> Result<Option<TextResult>, UpstreamError> {
        let response: TranslateResponse = self
            .send(self.http.post(self.url("/v2/translate")).json(request), key)
            .await?;
        Ok(response.translations.into_iter().next())
    }

    /// Returns the usage object verbatim.
    pub async fn usage(&self, key: &str) -> Result<Value, UpstreamError> {
        self.send(self.http.get(self.url("/v2/usage")), key).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        key: &str,
    ) -> Result<T, UpstreamError> {
        let auth = HeaderValue::from_str(&format!("DeepL-Auth-Key {key}"))
            .map_err(|e| UpstreamError::Request(format!("Invalid API key: {e}")))?;
        let response = builder
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Request(format!("Invalid JSON from DeepL: {e}")))
    }
}
