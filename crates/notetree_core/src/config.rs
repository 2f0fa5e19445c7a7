//! Process configuration read from the environment.
//!
//! # Responsibility
//! - Resolve API, logging and note store settings once at startup.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - A missing API base URL selects the offline in-memory notebook API.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_BASE_URL: &str = "NOTETREE_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NOTETREE_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "NOTETREE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTETREE_LOG_DIR";
pub const ENV_DB_PATH: &str = "NOTETREE_DB_PATH";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTimeout { value: String },
    InvalidLogLevel(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeout { value } => write!(
                f,
                "{ENV_TIMEOUT_SECS} must be a positive integer, got `{value}`"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Notebook API base URL. `None` runs against local demo data.
    pub api_base_url: Option<String>,
    pub request_timeout: Duration,
    pub log_level: &'static str,
    /// File log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    /// Note store file. `None` keeps notes in memory.
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: default_log_level(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        config.api_base_url = read(ENV_API_BASE_URL);

        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { value: raw })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?;
        }

        if let Some(raw) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&raw);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(raw));
            }
            config.log_dir = Some(path);
        }

        config.db_path = read(ENV_DB_PATH).map(PathBuf::from);
        Ok(config)
    }
}
