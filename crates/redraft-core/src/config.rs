//! Configuration management for redraft.
//!
//! Loads configuration from ${REDRAFT_HOME}/config.toml with sensible defaults.
//! The file only supplies starting values; an interactive session never writes
//! its settings back.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::options::{DEFAULT_TARGET_LANGUAGE, RephraseLanguage, Tone, WritingStyle};

pub mod paths {
    //! Path resolution for redraft configuration and data directories.
    //!
    //! REDRAFT_HOME resolution order:
    //! 1. REDRAFT_HOME environment variable (if set)
    //! 2. ~/.config/redraft (default)

    use std::path::PathBuf;

    /// Returns the redraft home directory.
    ///
    /// Checks REDRAFT_HOME env var first, falls back to ~/.config/redraft,
    /// and finally to a relative `.redraft` directory when no home exists.
    pub fn redraft_home() -> PathBuf {
        if let Ok(home) = std::env::var("REDRAFT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".redraft"),
            |h| h.join(".config").join("redraft"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        redraft_home().join("config.toml")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        redraft_home().join("logs")
    }
}

/// Default proxy base URL (matches the default `serve` address).
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8788";

/// Default DeepL API base URL used by the proxy.
pub const DEFAULT_DEEPL_BASE_URL: &str = "https://api.deepl.com";

/// Default quiet period before free-text input triggers a request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Starting values for rephrase mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RephraseDefaults {
    pub language: RephraseLanguage,
    pub writing_style: WritingStyle,
    pub tone: Tone,
}

/// Starting values for translate mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateDefaults {
    /// Source language code; empty means auto-detect.
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for TranslateDefaults {
    fn default() -> Self {
        Self {
            source_lang: String::new(),
            target_lang: DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

/// Proxy server configuration (`redraft serve`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// DeepL API key. Falls back to the `DEEPL_API_KEY` env var.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepl_api_key: Option<String>,
    /// DeepL base URL. `DEEPL_BASE_URL` env var takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepl_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8788".to_string(),
            deepl_api_key: None,
            deepl_base_url: None,
        }
    }
}

impl ServerConfig {
    /// Parses the listen address.
    ///
    /// # Errors
    /// Returns an error if the address is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .with_context(|| format!("Invalid server address: {}", self.addr))
    }

    /// Resolves the DeepL API key with precedence: env > config.
    ///
    /// Returns `None` when no key is configured; the proxy reports that per
    /// request instead of refusing to start.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("DEEPL_API_KEY") {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        self.deepl_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    /// Resolves the DeepL base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the resolved URL is malformed.
    pub fn resolve_deepl_base_url(&self) -> Result<String> {
        resolve_base_url(
            self.deepl_base_url.as_deref(),
            "DEEPL_BASE_URL",
            DEFAULT_DEEPL_BASE_URL,
            "DeepL",
        )
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the proxy exposing `/api/rephrase`, `/api/translate`, `/api/usage`.
    pub proxy_url: String,
    /// Per-request timeout for proxy calls, in seconds.
    pub request_timeout_secs: u64,
    /// Quiet period after typing before a request is sent, in milliseconds.
    pub debounce_ms: u64,
    pub rephrase: RephraseDefaults,
    pub translate: TranslateDefaults,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            request_timeout_secs: 30,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            rephrase: RephraseDefaults::default(),
            translate: TranslateDefaults::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        Ok(config.normalized())
    }

    /// Writes the default config template to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Resolves the proxy base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the resolved URL is malformed.
    pub fn resolve_proxy_url(&self) -> Result<String> {
        resolve_base_url(
            Some(&self.proxy_url),
            "REDRAFT_PROXY_URL",
            DEFAULT_PROXY_URL,
            "proxy",
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Applies the writing style / tone exclusivity rule to loaded defaults.
    ///
    /// A config naming both keeps the writing style.
    fn normalized(mut self) -> Self {
        if !self.rephrase.writing_style.is_default() && !self.rephrase.tone.is_default() {
            tracing::warn!(
                style = %self.rephrase.writing_style,
                tone = %self.rephrase.tone,
                "writing_style and tone are mutually exclusive; ignoring tone"
            );
            self.rephrase.tone = Tone::Default;
        }
        self.translate.source_lang = self.translate.source_lang.trim().to_string();
        if self.translate.target_lang.trim().is_empty() {
            self.translate.target_lang = DEFAULT_TARGET_LANGUAGE.to_string();
        }
        self
    }
}

/// Resolves a base URL with precedence: env > config > default.
///
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Errors
/// Returns an error if the chosen URL does not parse.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    name: &str,
) -> Result<String> {
    let candidate = std::env::var(env_var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            config_base_url
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default_url.to_string());

    let trimmed = candidate.trim().trim_end_matches('/');
    url::Url::parse(trimmed).with_context(|| format!("Invalid {name} base URL: {trimmed}"))?;
    Ok(trimmed.to_string())
}

/// Template written by `redraft config init`.
pub fn default_config_template() -> &'static str {
    r#"# redraft configuration

# Proxy exposing /api/rephrase, /api/translate and /api/usage.
proxy_url = "http://127.0.0.1:8788"

# Seconds before a proxy request is abandoned.
request_timeout_secs = 30

# Quiet period after typing before a request is sent.
debounce_ms = 400

[rephrase]
# en | de
language = "en"
# default | simple | business | academic | casual | prefer_*
writing_style = "default"
# default | enthusiastic | friendly | confident | diplomatic | prefer_*
# Only one of writing_style and tone may be set.
tone = "default"

[translate]
# Empty means auto-detect.
source_lang = ""
target_lang = "EN-US"

[server]
addr = "127.0.0.1:8788"
# deepl_api_key = "..."
# deepl_base_url = "https://api.deepl.com"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "debounce_ms = 250\n[rephrase]\nlanguage = \"de\"\ntone = \"friendly\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.rephrase.language, RephraseLanguage::De);
        assert_eq!(config.rephrase.tone, Tone::Friendly);
        assert_eq!(config.proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(config.translate.target_lang, "EN-US");
    }

    #[test]
    fn test_style_and_tone_both_set_keeps_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[rephrase]\nwriting_style = \"business\"\ntone = \"friendly\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.rephrase.writing_style, WritingStyle::Business);
        assert_eq!(config.rephrase.tone, Tone::Default);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::init(&path).unwrap();
        assert!(path.exists());
        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_resolve_base_url_strips_trailing_slash() {
        let url = resolve_base_url(
            Some("http://localhost:9000/"),
            "REDRAFT_TEST_UNSET_BASE_URL",
            DEFAULT_PROXY_URL,
            "proxy",
        )
        .unwrap();
        assert_eq!(url, "http://localhost:9000");
    }

    #[test]
    fn test_resolve_base_url_rejects_garbage() {
        let err = resolve_base_url(
            Some("not a url"),
            "REDRAFT_TEST_UNSET_BASE_URL",
            DEFAULT_PROXY_URL,
            "proxy",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid proxy base URL"));
    }
}
