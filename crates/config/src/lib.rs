//! Configuration loading, validation, and management for TremitiBot.
//!
//! Loads configuration from `~/.tremitibot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tremitibot_core::provider::ModelParameters;

/// The root configuration structure.
///
/// Maps directly to `~/.tremitibot/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden in `[provider]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Directory holding the `json_*.json` datasets
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Generation service connection
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Parameters for the answering call
    #[serde(default)]
    pub model: ModelConfig,

    /// Query classification strategy
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Knowledge base loading options
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Transcript recording
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_true() -> bool {
    true
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("data_dir", &self.data_dir)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("classifier", &self.classifier)
            .field("knowledge", &self.knowledge)
            .field("transcript", &self.transcript)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "anthropic" or "openai" (any OpenAI-compatible endpoint)
    #[serde(default = "default_provider_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_provider_kind() -> String {
    "anthropic".into()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            api_key: None,
            api_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_model_id() -> String {
    "claude-3-5-sonnet-20241022".into()
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_temperature() -> f32 {
    0.3
}
fn default_top_p() -> f32 {
    0.9
}

impl ModelConfig {
    pub fn parameters(&self) -> ModelParameters {
        ModelParameters {
            model: self.model_id.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Which classifier implementation answers "what is this message about?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierStrategy {
    /// Deterministic keyword rules
    #[default]
    Keyword,
    /// Zero-shot call to the generation service
    Model,
}

impl std::fmt::Display for ClassifierStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => f.write_str("keyword"),
            Self::Model => f.write_str("model"),
        }
    }
}

impl std::str::FromStr for ClassifierStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" | "keywords" | "rules" => Ok(Self::Keyword),
            "model" | "llm" => Ok(Self::Model),
            other => Err(ConfigError::ValidationError(format!(
                "unknown classifier strategy '{other}' (expected 'keyword' or 'model')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub strategy: ClassifierStrategy,

    /// Parameters for the classification call (model strategy only)
    #[serde(default = "default_classifier_model")]
    pub model: ModelConfig,
}

fn default_classifier_model() -> ModelConfig {
    ModelConfig {
        model_id: "claude-3-haiku-20240307".into(),
        max_tokens: 50,
        temperature: 0.1,
        top_p: 0.9,
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierStrategy::default(),
            model: default_classifier_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Add a `link` deep-link field to every object with an `id`
    #[serde(default)]
    pub annotate_links: bool,

    #[serde(default = "default_link_base_url")]
    pub link_base_url: String,

    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,
}

fn default_link_base_url() -> String {
    "https://tremitinow.it".into()
}
fn default_link_prefix() -> String {
    "page".into()
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            annotate_links: false,
            link_base_url: default_link_base_url(),
            link_prefix: default_link_prefix(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default)]
    pub enabled: bool,

    /// JSON-lines file receiving one record per answered question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Create the parent directory when missing
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

impl AppConfig {
    /// Load configuration from the default path (~/.tremitibot/config.toml).
    ///
    /// Environment variables override the file:
    /// - `TREMITIBOT_API_KEY`, then `ANTHROPIC_API_KEY` (only if no key is configured)
    /// - `TREMITIBOT_MODEL`, `TREMITIBOT_MAX_TOKENS`, `TREMITIBOT_TEMPERATURE`
    /// - `TREMITIBOT_DATA_DIR`, `TREMITIBOT_CLASSIFIER`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup, then re-validate.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("TREMITIBOT_API_KEY").or_else(|| lookup("ANTHROPIC_API_KEY"));
        }

        if let Some(model) = lookup("TREMITIBOT_MODEL") {
            self.model.model_id = model;
        }

        if let Some(raw) = lookup("TREMITIBOT_MAX_TOKENS") {
            match raw.parse::<u32>() {
                Ok(v) => self.model.max_tokens = v,
                Err(_) => tracing::warn!(value = %raw, "Ignoring unparseable TREMITIBOT_MAX_TOKENS"),
            }
        }

        if let Some(raw) = lookup("TREMITIBOT_TEMPERATURE") {
            match raw.parse::<f32>() {
                Ok(v) => self.model.temperature = v,
                Err(_) => tracing::warn!(value = %raw, "Ignoring unparseable TREMITIBOT_TEMPERATURE"),
            }
        }

        if let Some(dir) = lookup("TREMITIBOT_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(strategy) = lookup("TREMITIBOT_CLASSIFIER") {
            self.classifier.strategy = strategy.parse()?;
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".tremitibot")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_model("model", &self.model)?;
        validate_model("classifier.model", &self.classifier.model)?;

        if self.transcript.enabled && self.transcript.path.is_none() {
            return Err(ConfigError::ValidationError(
                "transcript.enabled requires transcript.path".into(),
            ));
        }

        Ok(())
    }

    /// The API key for the generation service: `[provider]` first, then top-level.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .or(self.api_key.as_deref())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.resolved_api_key().is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn validate_model(section: &str, model: &ModelConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&model.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "{section}.temperature must be between 0.0 and 1.0"
        )));
    }
    if !(0.0..=1.0).contains(&model.top_p) {
        return Err(ConfigError::ValidationError(format!(
            "{section}.top_p must be between 0.0 and 1.0"
        )));
    }
    if model.max_tokens == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{section}.max_tokens must be > 0"
        )));
    }
    Ok(())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            data_dir: default_data_dir(),
            provider: ProviderConfig::default(),
            model: ModelConfig::default(),
            classifier: ClassifierConfig::default(),
            knowledge: KnowledgeConfig::default(),
            transcript: TranscriptConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
