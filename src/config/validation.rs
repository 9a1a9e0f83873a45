use std::fmt;
use url::Url;

use super::{Config, ConfigError};

/// Advisory configuration gap. Execution continues with degraded
/// correctness; the forwarder logs these at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingApiKey,
    MissingEnvironment,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingApiKey => {
                write!(f, "API key is not set; notices will likely be rejected")
            }
            ConfigWarning::MissingEnvironment => {
                write!(f, "Environment name is not set")
            }
        }
    }
}

impl Config {
    /// Validate the configuration. Fatal faults (a malformed or non-HTTP
    /// endpoint URL, a zero timeout) return an error; advisory gaps come
    /// back as warnings.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        // Validate endpoint URL
        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid endpoint URL '{endpoint}': {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl(format!(
                    "Endpoint '{endpoint}' must use an http or https scheme"
                )));
            }
        }

        // Validate timeout
        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Connection timeout must be greater than 0".to_string(),
            ));
        }

        let mut warnings = Vec::new();
        if self.api_key.is_empty() {
            warnings.push(ConfigWarning::MissingApiKey);
        }
        if self.environment.is_empty() {
            warnings.push(ConfigWarning::MissingEnvironment);
        }
        Ok(warnings)
    }
}
