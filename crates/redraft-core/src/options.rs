//! Rephrase and translate options accepted by the proxy.
//!
//! The string forms match the proxy wire format (and the DeepL API it
//! forwards to), so `as_str()` is what goes into request payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target language for rephrasing.
///
/// The proxy only distinguishes German and English; everything else is
/// treated as English upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RephraseLanguage {
    #[default]
    En,
    De,
}

impl RephraseLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            RephraseLanguage::En => "en",
            RephraseLanguage::De => "de",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RephraseLanguage::En => "English",
            RephraseLanguage::De => "German",
        }
    }

    pub fn all() -> &'static [RephraseLanguage] {
        &[RephraseLanguage::En, RephraseLanguage::De]
    }
}

/// Writing style for rephrasing. `Default` means "let the API decide".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WritingStyle {
    #[default]
    Default,
    Simple,
    Business,
    Academic,
    Casual,
    PreferSimple,
    PreferBusiness,
    PreferAcademic,
    PreferCasual,
}

impl WritingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            WritingStyle::Default => "default",
            WritingStyle::Simple => "simple",
            WritingStyle::Business => "business",
            WritingStyle::Academic => "academic",
            WritingStyle::Casual => "casual",
            WritingStyle::PreferSimple => "prefer_simple",
            WritingStyle::PreferBusiness => "prefer_business",
            WritingStyle::PreferAcademic => "prefer_academic",
            WritingStyle::PreferCasual => "prefer_casual",
        }
    }

    pub fn is_default(self) -> bool {
        self == WritingStyle::Default
    }

    pub fn all() -> &'static [WritingStyle] {
        &[
            WritingStyle::Default,
            WritingStyle::Simple,
            WritingStyle::Business,
            WritingStyle::Academic,
            WritingStyle::Casual,
            WritingStyle::PreferSimple,
            WritingStyle::PreferBusiness,
            WritingStyle::PreferAcademic,
            WritingStyle::PreferCasual,
        ]
    }
}

/// Tone for rephrasing. `Default` means "let the API decide".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Default,
    Enthusiastic,
    Friendly,
    Confident,
    Diplomatic,
    PreferEnthusiastic,
    PreferFriendly,
    PreferConfident,
    PreferDiplomatic,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Default => "default",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Friendly => "friendly",
            Tone::Confident => "confident",
            Tone::Diplomatic => "diplomatic",
            Tone::PreferEnthusiastic => "prefer_enthusiastic",
            Tone::PreferFriendly => "prefer_friendly",
            Tone::PreferConfident => "prefer_confident",
            Tone::PreferDiplomatic => "prefer_diplomatic",
        }
    }

    pub fn is_default(self) -> bool {
        self == Tone::Default
    }

    pub fn all() -> &'static [Tone] {
        &[
            Tone::Default,
            Tone::Enthusiastic,
            Tone::Friendly,
            Tone::Confident,
            Tone::Diplomatic,
            Tone::PreferEnthusiastic,
            Tone::PreferFriendly,
            Tone::PreferConfident,
            Tone::PreferDiplomatic,
        ]
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase().replace('-', "_");
                <$ty>::all()
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == needle)
                    .ok_or_else(|| {
                        let valid: Vec<&str> = <$ty>::all().iter().map(|v| v.as_str()).collect();
                        format!(
                            "unknown {} '{}' (expected one of: {})",
                            $label,
                            s,
                            valid.join(", ")
                        )
                    })
            }
        }
    };
}

impl_str_conversions!(RephraseLanguage, "language");
impl_str_conversions!(WritingStyle, "writing style");
impl_str_conversions!(Tone, "tone");

/// A language the translate endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCode {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> LanguageCode {
    LanguageCode { code, name }
}

/// Languages accepted as a translation source (auto-detect is `None`).
pub const SOURCE_LANGUAGES: &[LanguageCode] = &[
    lang("BG", "Bulgarian"),
    lang("CS", "Czech"),
    lang("DA", "Danish"),
    lang("DE", "German"),
    lang("EL", "Greek"),
    lang("EN", "English"),
    lang("ES", "Spanish"),
    lang("ET", "Estonian"),
    lang("FI", "Finnish"),
    lang("FR", "French"),
    lang("HU", "Hungarian"),
    lang("ID", "Indonesian"),
    lang("IT", "Italian"),
    lang("JA", "Japanese"),
    lang("KO", "Korean"),
    lang("LT", "Lithuanian"),
    lang("LV", "Latvian"),
    lang("NB", "Norwegian"),
    lang("NL", "Dutch"),
    lang("PL", "Polish"),
    lang("PT", "Portuguese"),
    lang("RO", "Romanian"),
    lang("RU", "Russian"),
    lang("SK", "Slovak"),
    lang("SL", "Slovenian"),
    lang("SV", "Swedish"),
    lang("TR", "Turkish"),
    lang("UK", "Ukrainian"),
    lang("ZH", "Chinese"),
];

/// Languages accepted as a translation target.
pub const TARGET_LANGUAGES: &[LanguageCode] = &[
    lang("BG", "Bulgarian"),
    lang("CS", "Czech"),
    lang("DA", "Danish"),
    lang("DE", "German"),
    lang("EL", "Greek"),
    lang("EN-GB", "English (British)"),
    lang("EN-US", "English (American)"),
    lang("ES", "Spanish"),
    lang("ET", "Estonian"),
    lang("FI", "Finnish"),
    lang("FR", "French"),
    lang("HU", "Hungarian"),
    lang("ID", "Indonesian"),
    lang("IT", "Italian"),
    lang("JA", "Japanese"),
    lang("KO", "Korean"),
    lang("LT", "Lithuanian"),
    lang("LV", "Latvian"),
    lang("NB", "Norwegian"),
    lang("NL", "Dutch"),
    lang("PL", "Polish"),
    lang("PT-BR", "Portuguese (Brazilian)"),
    lang("PT-PT", "Portuguese (European)"),
    lang("RO", "Romanian"),
    lang("RU", "Russian"),
    lang("SK", "Slovak"),
    lang("SL", "Slovenian"),
    lang("SV", "Swedish"),
    lang("TR", "Turkish"),
    lang("UK", "Ukrainian"),
    lang("ZH", "Chinese"),
];

/// Default translation target.
pub const DEFAULT_TARGET_LANGUAGE: &str = "EN-US";

/// Looks up a display name for a source or target code (case-insensitive).
pub fn language_name(code: &str) -> Option<&'static str> {
    TARGET_LANGUAGES
        .iter()
        .chain(SOURCE_LANGUAGES)
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .map(|l| l.name)
}

/// Maps a target code to a code valid as a source (`EN-US` -> `EN`).
pub fn as_source_code(code: &str) -> Option<&'static str> {
    let base = code.split('-').next().unwrap_or(code);
    SOURCE_LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(base))
        .map(|l| l.code)
}

/// Maps a source code to a code valid as a target (`EN` -> `EN-US`).
pub fn as_target_code(code: &str) -> Option<&'static str> {
    if let Some(exact) = TARGET_LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
    {
        return Some(exact.code);
    }
    match code.to_ascii_uppercase().as_str() {
        "EN" => Some("EN-US"),
        "PT" => Some("PT-PT"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parses_wire_and_dashed_forms() {
        assert_eq!(
            "prefer_casual".parse::<WritingStyle>().unwrap(),
            WritingStyle::PreferCasual
        );
        assert_eq!(
            "Prefer-Business".parse::<WritingStyle>().unwrap(),
            WritingStyle::PreferBusiness
        );
        assert!("loud".parse::<Tone>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Tone::PreferDiplomatic).unwrap();
        assert_eq!(json, r#""prefer_diplomatic""#);
        let lang: RephraseLanguage = serde_json::from_str(r#""de""#).unwrap();
        assert_eq!(lang, RephraseLanguage::De);
    }

    #[test]
    fn test_code_mapping_between_source_and_target() {
        assert_eq!(as_source_code("EN-GB"), Some("EN"));
        assert_eq!(as_source_code("de"), Some("DE"));
        assert_eq!(as_target_code("EN"), Some("EN-US"));
        assert_eq!(as_target_code("fr"), Some("FR"));
        assert_eq!(as_target_code("XX"), None);
        assert_eq!(language_name("pt-br"), Some("Portuguese (Brazilian)"));
    }
}
