//! Wire types and client for the rephrase/translate proxy.

mod client;
mod error;

pub use client::ProxyClient;
pub use error::{ApiError, ApiErrorKind, ErrorRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::options::{RephraseLanguage, Tone, WritingStyle};

/// Body of `POST /api/rephrase`.
///
/// At most one of `writing_style` and `tone` is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephraseRequest {
    pub text: String,
    pub language: RephraseLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_style: Option<WritingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl RephraseRequest {
    /// Builds a request, dropping default options. A non-default style
    /// takes precedence over the tone.
    pub fn new(
        text: impl Into<String>,
        language: RephraseLanguage,
        writing_style: WritingStyle,
        tone: Tone,
    ) -> Self {
        let (writing_style, tone) = if !writing_style.is_default() {
            (Some(writing_style), None)
        } else if !tone.is_default() {
            (None, Some(tone))
        } else {
            (None, None)
        };
        Self {
            text: text.into(),
            language,
            writing_style,
            tone,
        }
    }
}

/// Body of `POST /api/translate`. An absent `source_lang` means auto-detect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    pub target_lang: String,
}

impl TranslateRequest {
    /// Empty or blank source codes become auto-detect.
    pub fn new(
        text: impl Into<String>,
        source_lang: Option<&str>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            target_lang: target_lang.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephraseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rephrased_text: Option<String>,
    /// Older proxies answered with `text` instead of `rephrased_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl RephraseResponse {
    pub fn result(&self) -> Option<&str> {
        self.rephrased_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.text.as_deref().filter(|s| !s.is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl TranslateResponse {
    pub fn result(&self) -> Option<&str> {
        self.translated_text.as_deref().filter(|s| !s.is_empty())
    }
}

/// Character usage reported by `GET /api/usage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_limit: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Usage {
    /// Short form for a status line, e.g. `12,345 / 500,000 chars (2%)`.
    pub fn summary(&self) -> String {
        match (self.character_count, self.character_limit) {
            (Some(count), Some(limit)) if limit > 0 => {
                let percent = count.saturating_mul(100) / limit;
                format!(
                    "{} / {} chars ({percent}%)",
                    group_thousands(count),
                    group_thousands(limit)
                )
            }
            (Some(count), _) => format!("{} chars", group_thousands(count)),
            _ => "usage unknown".to_string(),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rephrase_request_sends_style_over_tone() {
        let req = RephraseRequest::new(
            "hi",
            RephraseLanguage::En,
            WritingStyle::Business,
            Tone::Friendly,
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"text": "hi", "language": "en", "writing_style": "business"})
        );
    }

    #[test]
    fn test_rephrase_request_omits_defaults() {
        let req = RephraseRequest::new(
            "hi",
            RephraseLanguage::De,
            WritingStyle::Default,
            Tone::Default,
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"text": "hi", "language": "de"})
        );
    }

    #[test]
    fn test_translate_request_blank_source_is_auto() {
        let req = TranslateRequest::new("hallo", Some(" "), "EN-US");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"text": "hallo", "target_lang": "EN-US"})
        );
    }

    #[test]
    fn test_rephrase_response_falls_back_to_text_field() {
        let resp: RephraseResponse = serde_json::from_str(r#"{"text":"old shape"}"#).unwrap();
        assert_eq!(resp.result(), Some("old shape"));
        let empty: RephraseResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.result(), None);
    }

    #[test]
    fn test_usage_summary() {
        let usage: Usage = serde_json::from_str(
            r#"{"character_count":12345,"character_limit":500000,"api_key_character_count":1}"#,
        )
        .unwrap();
        assert_eq!(usage.summary(), "12,345 / 500,000 chars (2%)");
        assert!(usage.extra.contains_key("api_key_character_count"));
        assert_eq!(Usage::default().summary(), "usage unknown");
    }
}
