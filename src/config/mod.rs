mod env;
mod validation;

pub use validation::ConfigWarning;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::policy::DispatchMode;
use env::{load_env_string, load_env_string_opt, load_env_var};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Forwarder configuration. Set once at startup and validated at start;
/// nothing here changes while events are flowing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Error-tracker project key. Missing values produce a startup
    /// warning, not a hard failure.
    pub api_key: String,

    /// Deployment environment name reported on every notice.
    pub environment: String,

    /// Error-tracker endpoint URL; the client default applies when unset.
    /// Must use an http or https scheme.
    pub endpoint: Option<String>,

    /// Which log events are eligible for notification.
    pub dispatch_mode: DispatchMode,

    /// Master switch; a disabled forwarder suppresses everything.
    pub enabled: bool,

    /// Enricher factory identifier; resolved against the registry at
    /// startup. Unset means the injected default capability, or no-op.
    pub enricher_factory: Option<String>,

    /// Request timeout for notice submission in seconds.
    pub connection_timeout_secs: u64,

    /// Function-name prefixes dropped from notice backtraces.
    pub backtrace_filters: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            environment: String::new(),
            endpoint: None,
            dispatch_mode: DispatchMode::default(),
            enabled: true,
            enricher_factory: None,
            connection_timeout_secs: 30,
            backtrace_filters: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `NOTICE_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string("NOTICE_API_KEY", &mut config.api_key);
        load_env_string("NOTICE_ENVIRONMENT", &mut config.environment);
        load_env_string_opt("NOTICE_ENDPOINT", &mut config.endpoint);

        // DispatchMode requires special handling for case-insensitive parsing
        if let Ok(mode) = std::env::var("NOTICE_DISPATCH_MODE") {
            config.dispatch_mode = match mode.to_lowercase().as_str() {
                "all" => DispatchMode::All,
                "exceptions_only" => DispatchMode::ExceptionsOnly,
                "off" => DispatchMode::Off,
                _ => {
                    return Err(ConfigError::EnvError(format!(
                        "Invalid NOTICE_DISPATCH_MODE: {mode}. Valid values: all, exceptions_only, off"
                    )));
                }
            };
        }

        load_env_var("NOTICE_ENABLED", &mut config.enabled)?;
        load_env_string_opt("NOTICE_ENRICHER_FACTORY", &mut config.enricher_factory);
        load_env_var("NOTICE_CONNECTION_TIMEOUT_SECS", &mut config.connection_timeout_secs)?;

        if let Ok(filters) = std::env::var("NOTICE_BACKTRACE_FILTERS") {
            config.backtrace_filters = filters
                .split(',')
                .map(|filter| filter.trim().to_string())
                .filter(|filter| !filter.is_empty())
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}
