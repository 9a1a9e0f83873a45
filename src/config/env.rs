use super::ConfigError;

/// Load and parse an environment variable into `target`.
/// A missing variable keeps the default; an unparsable one is an error.
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Load an optional string environment variable.
pub fn load_env_string_opt(name: &str, target: &mut Option<String>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(value);
    }
}

/// Load a string environment variable.
pub fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}
