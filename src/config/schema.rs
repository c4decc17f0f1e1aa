use crate::chat::{ApiKey, ChatSettings};
use crate::error::ConfigError;
use crate::llm::DEFAULT_REQUEST_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://llm.chutes.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3-0324";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, polite and accurate AI assistant. \
Give answers that are short, concise and informative.";
pub const DEFAULT_DATA_DIR: &str = "~/.chatkra/data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to config.toml - set by the loader, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Directory holding persisted conversations and settings. `~` is expanded.
    pub data_dir: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Settings used until `settings set` persists a record, and again after
    /// `settings reset`. A persisted record takes precedence over these and
    /// over the `CHATKRA_*` overrides applied to them.
    pub defaults: DefaultSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            data_dir: DEFAULT_DATA_DIR.into(),
            log_level: DEFAULT_LOG_LEVEL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            defaults: DefaultSettings::default(),
        }
    }
}

impl Config {
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).as_ref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn chat_settings(&self) -> ChatSettings {
        self.defaults.to_settings()
    }

    /// Level for the tracing subscriber. Unknown names fall back to `info`.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chat_settings()
            .validate()
            .map_err(|reason| ConfigError::Validation(format!("[defaults] {reason}")))?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of {} (got {:?})",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Validation("data_dir must not be empty".into()));
        }
        Ok(())
    }
}

// ── Default chat settings ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub endpoint: String,
    pub api_key: ApiKey,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: ApiKey::default(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }
}

impl DefaultSettings {
    pub fn to_settings(&self) -> ChatSettings {
        ChatSettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            system_prompt: self.system_prompt.clone(),
        }
    }
}
