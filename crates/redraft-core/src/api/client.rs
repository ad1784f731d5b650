use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{
    ApiError, RephraseRequest, RephraseResponse, TranslateRequest, TranslateResponse, Usage,
};
use crate::config::Config;

const USER_AGENT_VALUE: &str = concat!("redraft/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the rephrase/translate proxy.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProxyClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Builds a client from config (`REDRAFT_PROXY_URL` overrides `proxy_url`).
    ///
    /// # Errors
    /// Returns an error if the proxy URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.resolve_proxy_url()?, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn rephrase(&self, request: &RephraseRequest) -> Result<RephraseResponse, ApiError> {
        tracing::debug!(
            chars = request.text.chars().count(),
            language = %request.language,
            "rephrase request"
        );
        self.post_json("/api/rephrase", request).await
    }

    pub async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, ApiError> {
        tracing::debug!(
            chars = request.text.chars().count(),
            source = request.source_lang.as_deref().unwrap_or("auto"),
            target = %request.target_lang,
            "translate request"
        );
        self.post_json("/api/translate", request).await
    }

    pub async fn usage(&self) -> Result<Usage, ApiError> {
        let response = self
            .http
            .get(self.url("/api/usage"))
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ApiError::transport(&e))?;

    if !status.is_success() {
        let err = ApiError::upstream(status.as_u16(), status.canonical_reason(), &body);
        tracing::warn!(status = status.as_u16(), reason = %err, "proxy returned an error");
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(status = status.as_u16(), error = %e, "proxy response was not valid JSON");
        ApiError::parse(status.as_u16(), &e)
    })
}
