//! Startup configuration.
//!
//! # Responsibility
//! - Build one explicit `AppConfig` at startup and hand it to every component.
//! - Source secrets (AI key) and paths from the environment, never from code.
//!
//! # Invariants
//! - An absent or blank `TASKPILOT_AI_API_KEY` disables the AI client; it is not
//!   an error.
//! - The API key never appears in `Debug` output.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "TASKPILOT_DB_PATH";
pub const ENV_AI_API_KEY: &str = "TASKPILOT_AI_API_KEY";
pub const ENV_AI_MODEL: &str = "TASKPILOT_AI_MODEL";
pub const ENV_AI_BASE_URL: &str = "TASKPILOT_AI_BASE_URL";
pub const ENV_AI_TIMEOUT_SECS: &str = "TASKPILOT_AI_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "TASKPILOT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKPILOT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "taskpilot.sqlite3";
const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    ZeroTimeout { key: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a non-negative integer, got `{value}`")
            }
            Self::ZeroTimeout { key } => write!(f, "`{key}` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// SQLite store location and connection tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }
}

/// Generative-text service settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl AiConfig {
    /// Config with no API key; the adapter falls back for every request.
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Debug for AiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Log sink settings. `dir = None` leaves logging uninitialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub ai: AiConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let store = StoreConfig::new(
            read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
        );

        let timeout_secs = match read(ENV_AI_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_AI_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::ZeroTimeout {
                        key: ENV_AI_TIMEOUT_SECS,
                    });
                }
                secs
            }
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        let ai = AiConfig {
            api_key: read(ENV_AI_API_KEY),
            model: read(ENV_AI_MODEL).unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            base_url: read(ENV_AI_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let logging = LogConfig {
            level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            dir: read(ENV_LOG_DIR).map(PathBuf::from),
        };

        Ok(Self { store, ai, logging })
    }
}
