//! Config file loading.
//!
//! `Config::load()`:
//! 1. Read the optional config file into a TOML tree (missing file → empty)
//! 2. Apply `TIDINGS_*` env var fallbacks for unset fields
//! 3. Deserialize the tree → `Config`
//! 4. Validate

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load configuration from an optional file plus the process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file exists but is unreadable or
/// malformed, an env var has the wrong type, or validation fails.
pub fn load(path: Option<&Path>) -> ConfigResult<Config> {
    load_with_env(path, &collect_env_vars())
}

/// Same as [`load`] with an explicit environment snapshot.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env(
    path: Option<&Path>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<Config> {
    let mut tree = match path {
        Some(p) => match try_load_file(p)? {
            Some(value) => {
                info!(path = %p.display(), "loaded config file");
                value
            },
            None => empty_tree(),
        },
        None => empty_tree(),
    };

    let env_count = apply_env_fallbacks(&mut tree, env_vars)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    let config: Config = tree
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.map_or_else(|| "<environment>".to_owned(), |p| p.display().to_string()),
            source: e,
        })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Load a config from a specific file path, without env fallbacks.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let metadata = std::fs::metadata(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(oversized(path, metadata.len()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_str(&content, &path.display().to_string())
}

/// Parse and validate a TOML document.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the document is malformed or invalid.
pub fn parse_str(content: &str, origin: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

fn empty_tree() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

fn oversized(path: &Path, len: u64) -> ConfigError {
    ConfigError::ValidationError {
        field: path.display().to_string(),
        message: format!(
            "config file is {len} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
        ),
    }
}

/// Read a file into a TOML tree, returning `None` if it doesn't exist.
///
/// The size cap is checked against the file metadata before any read.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(oversized(path, metadata.len()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}
