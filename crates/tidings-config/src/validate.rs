//! Post-load configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Largest accepted `registry.initial_capacity`.
pub const MAX_INITIAL_CAPACITY: usize = 65_536;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_registry(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_registry(config: &Config) -> ConfigResult<()> {
    if config.registry.initial_capacity > MAX_INITIAL_CAPACITY {
        return Err(ConfigError::ValidationError {
            field: "registry.initial_capacity".to_owned(),
            message: format!(
                "initial_capacity {} exceeds the limit of {MAX_INITIAL_CAPACITY}",
                config.registry.initial_capacity
            ),
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    if !VALID_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                VALID_LEVELS.join(", ")
            ),
        });
    }

    if !VALID_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                VALID_FORMATS.join(", ")
            ),
        });
    }

    if let Some(empty) = config.logging.directives.iter().position(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: format!("logging.directives[{empty}]"),
            message: "directive must not be empty".to_owned(),
        });
    }

    Ok(())
}
