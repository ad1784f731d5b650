//! `/api/*` handlers.
//!
//! Bodies are taken as raw bytes and parsed here so malformed JSON gets the
//! same `Internal server error` shape as any other unexpected failure.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use crate::SharedState;
use crate::deepl::{TranslateRequest, UpstreamError, WriteRequest};

const MISSING_KEY: &str = "DeepL API key not configured. Set DEEPL_API_KEY or \
                           server.deepl_api_key in config.toml.";

#[derive(Debug)]
pub enum ProxyError {
    BadRequest(&'static str),
    MissingApiKey(&'static str),
    Upstream { status: u16, details: String },
    NoResult(&'static str),
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ProxyError::MissingApiKey(message) | ProxyError::NoResult(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            ProxyError::Upstream { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": "DeepL API error", "details": details, "status": status }),
            ),
            ProxyError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error", "message": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => {
                tracing::warn!(status, "DeepL request failed");
                ProxyError::Upstream {
                    status,
                    details: body,
                }
            }
            UpstreamError::Request(message) => {
                tracing::warn!(%message, "DeepL request error");
                ProxyError::Internal(message)
            }
        }
    }
}

type ApiResult = Result<Json<Value>, ProxyError>;

fn parse_object(body: &Bytes) -> Result<Map<String, Value>, ProxyError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(ProxyError::Internal(e.to_string())),
    }
}

/// A non-empty string field, or `None`.
fn string_field<'a>(body: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Option value worth forwarding: present and not `default`.
fn option_field(body: &Map<String, Value>, name: &str) -> Option<String> {
    string_field(body, name)
        .filter(|v| *v != "default")
        .map(str::to_string)
}

fn require_text(body: &Map<String, Value>) -> Result<String, ProxyError> {
    string_field(body, "text")
        .map(str::to_string)
        .ok_or(ProxyError::BadRequest("Text is required and must be a string"))
}

fn require_key(state: &SharedState, message: &'static str) -> Result<String, ProxyError> {
    state
        .api_key
        .clone()
        .ok_or(ProxyError::MissingApiKey(message))
}

pub async fn rephrase(State(state): State<SharedState>, body: Bytes) -> ApiResult {
    let body = parse_object(&body)?;
    let text = require_text(&body)?;
    let key = require_key(&state, MISSING_KEY)?;

    let target_lang = if string_field(&body, "language") == Some("de") {
        "de"
    } else {
        "en"
    };
    let (writing_style, tone) = match option_field(&body, "writing_style") {
        Some(style) => (Some(style), None),
        None => (None, option_field(&body, "tone")),
    };
    let request = WriteRequest {
        text: vec![text],
        target_lang: target_lang.to_string(),
        writing_style,
        tone,
    };
    tracing::debug!(target_lang, style = ?request.writing_style, tone = ?request.tone, "rephrase");

    let improvement = state
        .deepl
        .rephrase(&key, &request)
        .await?
        .ok_or(ProxyError::NoResult("No improvements returned from DeepL"))?;
    Ok(Json(json!({
        "rephrased_text": improvement.text,
        "detected_language": improvement.detected_source_language,
    })))
}

pub async fn translate(State(state): State<SharedState>, body: Bytes) -> ApiResult {
    let body = parse_object(&body)?;
    let text = require_text(&body)?;
    let target_lang = string_field(&body, "target_lang")
        .map(str::to_string)
        .ok_or(ProxyError::BadRequest("Target language is required"))?;
    let key = require_key(&state, MISSING_KEY)?;

    let request = TranslateRequest {
        text: vec![text],
        target_lang,
        source_lang: string_field(&body, "source_lang").map(str::to_string),
    };
    tracing::debug!(
        source = request.source_lang.as_deref().unwrap_or("auto"),
        target = %request.target_lang,
        "translate"
    );

    let translation = state
        .deepl
        .translate(&key, &request)
        .await?
        .ok_or(ProxyError::NoResult("No translation returned from DeepL"))?;
    Ok(Json(json!({
        "translated_text": translation.text,
        "detected_language": translation.detected_source_language,
    })))
}

pub async fn usage(State(state): State<SharedState>) -> ApiResult {
    let key = require_key(&state, "DeepL API key not configured")?;
    Ok(Json(state.deepl.usage(&key).await?))
}

pub async fn hello() -> Json<Value> {
    Json(json!({
        "message": "Hello from redraft!",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
