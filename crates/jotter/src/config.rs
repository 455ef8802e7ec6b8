//! Configuration management for jotter.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "jotter";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "notes.db";

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `JOTTER_`)
/// 2. TOML config file at `~/.config/jotter/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Summarizer configuration.
    pub summarizer: SummarizerConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/jotter/notes.db`
    pub database_path: Option<PathBuf>,
}

/// Summarizer-related configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Model name used for `generateContent`.
    pub model: String,
    /// Base URL of the generative language API.
    pub base_url: String,
    /// API key. Takes precedence over `api_key_env` when set.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Minimum trimmed note length (in characters) before a summary is requested.
    pub min_chars: usize,
    /// Request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: "API_KEY".to_string(),
            temperature: 0.3,
            top_p: 0.9,
            top_k: 20,
            min_chars: 50,
            timeout_secs: 60,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("min_chars", &self.min_chars)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SummarizerConfig {
    /// Resolve the API key from config or the configured environment variable.
    ///
    /// Empty values count as missing.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `JOTTER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("JOTTER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let s = &self.summarizer;

        if s.model.trim().is_empty() {
            return Err(invalid("summarizer.model cannot be empty"));
        }

        if !(s.base_url.starts_with("http://") || s.base_url.starts_with("https://")) {
            return Err(invalid(format!(
                "summarizer.base_url must be an http(s) URL, got '{}'",
                s.base_url
            )));
        }

        if s.api_key_env.trim().is_empty() {
            return Err(invalid("summarizer.api_key_env cannot be empty"));
        }

        if !(0.0..=2.0).contains(&s.temperature) {
            return Err(invalid(format!(
                "summarizer.temperature ({}) must be between 0 and 2",
                s.temperature
            )));
        }

        if !(s.top_p > 0.0 && s.top_p <= 1.0) {
            return Err(invalid(format!(
                "summarizer.top_p ({}) must be in (0, 1]",
                s.top_p
            )));
        }

        if s.top_k == 0 {
            return Err(invalid("summarizer.top_k must be greater than 0"));
        }

        if s.min_chars == 0 {
            return Err(invalid("summarizer.min_chars must be greater than 0"));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigValidation {
        message: message.into(),
    }
}
