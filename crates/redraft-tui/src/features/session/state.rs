//! Operating mode and per-mode options.
//!
//! Every setter returns whether the state actually changed, so callers only
//! re-run an operation when something the request depends on is different.

use redraft_core::api::{RephraseRequest, TranslateRequest};
use redraft_core::config::Config;
use redraft_core::options::{
    self, DEFAULT_TARGET_LANGUAGE, RephraseLanguage, Tone, WritingStyle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Rephrase,
    Translate,
}

impl OperationMode {
    pub fn toggled(self) -> Self {
        match self {
            OperationMode::Rephrase => OperationMode::Translate,
            OperationMode::Translate => OperationMode::Rephrase,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationMode::Rephrase => "Rephrase",
            OperationMode::Translate => "Translate",
        }
    }

    /// Placeholder shown while a request is in flight.
    pub fn pending_text(self) -> &'static str {
        match self {
            OperationMode::Rephrase => "Rephrasing...",
            OperationMode::Translate => "Translating...",
        }
    }

    /// Shown when a successful response carries no result text.
    pub fn empty_result_text(self) -> &'static str {
        match self {
            OperationMode::Rephrase => "No rephrasing available.",
            OperationMode::Translate => "No translation available.",
        }
    }
}

/// Rephrase options. At most one of `writing_style` and `tone` is
/// non-default at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RephraseConfig {
    pub language: RephraseLanguage,
    pub writing_style: WritingStyle,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    /// `None` means auto-detect.
    pub source_lang: Option<String>,
    pub target_lang: String,
    /// Source language the proxy detected for the last translation.
    pub last_detected_source: Option<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            source_lang: None,
            target_lang: DEFAULT_TARGET_LANGUAGE.to_string(),
            last_detected_source: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub mode: OperationMode,
    pub rephrase: RephraseConfig,
    pub translate: TranslateConfig,
    /// Language reported by the last successful call of either mode.
    pub detected_language: Option<String>,
}

impl SessionState {
    /// Initial options from the `[rephrase]` and `[translate]` config
    /// sections.
    pub fn from_config(config: &Config) -> Self {
        let source = config.translate.source_lang.trim();
        let target = config.translate.target_lang.trim();
        Self {
            mode: OperationMode::Rephrase,
            rephrase: RephraseConfig {
                language: config.rephrase.language,
                writing_style: config.rephrase.writing_style,
                tone: if config.rephrase.writing_style.is_default() {
                    config.rephrase.tone
                } else {
                    Tone::Default
                },
            },
            translate: TranslateConfig {
                source_lang: (!source.is_empty()).then(|| source.to_string()),
                target_lang: if target.is_empty() {
                    DEFAULT_TARGET_LANGUAGE.to_string()
                } else {
                    target.to_string()
                },
                last_detected_source: None,
            },
            detected_language: None,
        }
    }

    pub fn set_mode(&mut self, mode: OperationMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn set_language(&mut self, language: RephraseLanguage) -> bool {
        if self.rephrase.language == language {
            return false;
        }
        self.rephrase.language = language;
        true
    }

    /// A non-default style resets the tone.
    pub fn set_writing_style(&mut self, style: WritingStyle) -> bool {
        if self.rephrase.writing_style == style {
            return false;
        }
        self.rephrase.writing_style = style;
        if !style.is_default() {
            self.rephrase.tone = Tone::Default;
        }
        true
    }

    /// A non-default tone resets the style.
    pub fn set_tone(&mut self, tone: Tone) -> bool {
        if self.rephrase.tone == tone {
            return false;
        }
        self.rephrase.tone = tone;
        if !tone.is_default() {
            self.rephrase.writing_style = WritingStyle::Default;
        }
        true
    }

    /// Blank codes mean auto-detect.
    pub fn set_source_lang(&mut self, code: Option<String>) -> bool {
        let code = code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if self.translate.source_lang == code {
            return false;
        }
        self.translate.source_lang = code;
        true
    }

    pub fn set_target_lang(&mut self, code: impl Into<String>) -> bool {
        let code = code.into().trim().to_string();
        if code.is_empty() || self.translate.target_lang == code {
            return false;
        }
        self.translate.target_lang = code;
        true
    }

    /// Exchanges source and target.
    ///
    /// With an auto-detect source the last detected language stands in; if
    /// none is known the swap does nothing.
    pub fn swap_languages(&mut self) -> bool {
        let source = match &self.translate.source_lang {
            Some(code) => code.clone(),
            None => match &self.translate.last_detected_source {
                Some(detected) => detected.clone(),
                None => return false,
            },
        };
        let target = self.translate.target_lang.clone();

        let new_target = options::as_target_code(&source)
            .map_or_else(|| source.clone(), str::to_string);
        let new_source = options::as_source_code(&target)
            .map_or_else(|| target.clone(), str::to_string);

        let changed = self.translate.source_lang.as_deref() != Some(new_source.as_str())
            || self.translate.target_lang != new_target;
        self.translate.source_lang = Some(new_source);
        self.translate.target_lang = new_target;
        changed
    }

    pub fn rephrase_request(&self, text: &str) -> RephraseRequest {
        RephraseRequest::new(
            text,
            self.rephrase.language,
            self.rephrase.writing_style,
            self.rephrase.tone,
        )
    }

    pub fn translate_request(&self, text: &str) -> TranslateRequest {
        TranslateRequest::new(
            text,
            self.translate.source_lang.as_deref(),
            self.translate.target_lang.clone(),
        )
    }

    pub fn record_detected(&mut self, mode: OperationMode, detected: Option<&str>) {
        let detected = detected
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        if mode == OperationMode::Translate && detected.is_some() {
            self.translate.last_detected_source.clone_from(&detected);
        }
        self.detected_language = detected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_and_tone_are_mutually_exclusive() {
        let mut session = SessionState::default();

        assert!(session.set_tone(Tone::Friendly));
        assert!(session.set_writing_style(WritingStyle::Business));
        assert_eq!(session.rephrase.tone, Tone::Default);
        assert_eq!(session.rephrase.writing_style, WritingStyle::Business);

        assert!(session.set_tone(Tone::Confident));
        assert_eq!(session.rephrase.writing_style, WritingStyle::Default);
    }

    #[test]
    fn test_setting_default_leaves_other_option() {
        let mut session = SessionState::default();
        session.set_tone(Tone::Diplomatic);

        assert!(!session.set_writing_style(WritingStyle::Default));
        assert_eq!(session.rephrase.tone, Tone::Diplomatic);

        session.set_writing_style(WritingStyle::Casual);
        assert!(session.set_writing_style(WritingStyle::Default));
        assert_eq!(session.rephrase.tone, Tone::Default);
    }

    #[test]
    fn test_same_value_is_not_a_change() {
        let mut session = SessionState::default();
        assert!(!session.set_mode(OperationMode::Rephrase));
        assert!(!session.set_language(RephraseLanguage::En));
        assert!(!session.set_target_lang("EN-US"));
        assert!(!session.set_source_lang(Some("  ".into())));
    }

    #[test]
    fn test_swap_exchanges_codes() {
        let mut session = SessionState::default();
        session.set_source_lang(Some("DE".into()));

        assert!(session.swap_languages());
        assert_eq!(session.translate.source_lang.as_deref(), Some("EN"));
        assert_eq!(session.translate.target_lang, "DE");

        assert!(session.swap_languages());
        assert_eq!(session.translate.source_lang.as_deref(), Some("DE"));
        assert_eq!(session.translate.target_lang, "EN-US");
    }

    #[test]
    fn test_swap_with_auto_source_uses_detected_language() {
        let mut session = SessionState::default();
        assert!(!session.swap_languages());
        assert_eq!(session.translate.source_lang, None);

        session.record_detected(OperationMode::Translate, Some("FR"));
        assert!(session.swap_languages());
        assert_eq!(session.translate.source_lang.as_deref(), Some("EN"));
        assert_eq!(session.translate.target_lang, "FR");
    }

    #[test]
    fn test_from_config_enforces_exclusivity() {
        let mut config = Config::default();
        config.rephrase.writing_style = WritingStyle::Academic;
        config.rephrase.tone = Tone::Friendly;
        config.translate.source_lang = "de".into();

        let session = SessionState::from_config(&config);
        assert_eq!(session.rephrase.tone, Tone::Default);
        assert_eq!(session.translate.source_lang.as_deref(), Some("de"));
        assert_eq!(session.translate.target_lang, DEFAULT_TARGET_LANGUAGE);
    }
}
