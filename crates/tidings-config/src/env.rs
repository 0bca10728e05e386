//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only fill fields that the
//! loaded config file left unset.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "TIDINGS_";

/// How the raw string of an env var becomes a TOML value.
#[derive(Debug, Clone, Copy)]
enum EnvKind {
    Str,
    Bool,
    Count,
}

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    kind: EnvKind,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "TIDINGS_LOG_LEVEL",
        field_path: "logging.level",
        kind: EnvKind::Str,
    },
    EnvMapping {
        var_name: "TIDINGS_LOG_FORMAT",
        field_path: "logging.format",
        kind: EnvKind::Str,
    },
    EnvMapping {
        var_name: "TIDINGS_ISOLATE_PANICS",
        field_path: "registry.isolate_panics",
        kind: EnvKind::Bool,
    },
    EnvMapping {
        var_name: "TIDINGS_WARN_LISTENER_COUNT",
        field_path: "registry.warn_listener_count",
        kind: EnvKind::Count,
    },
];

/// Snapshot every `TIDINGS_*` variable from the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .collect()
}

/// Fill unset fields of `root` from `env_vars`.
///
/// Returns the number of fields that were filled.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a variable cannot be converted to the
/// type of its field.
pub fn apply_env_fallbacks(
    root: &mut toml::Value,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied: usize = 0;

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if lookup(root, mapping.field_path).is_some() {
            continue;
        }

        let value = convert(mapping, raw)?;
        insert(root, mapping.field_path, value);
        debug!(var = mapping.var_name, field = mapping.field_path, "env fallback applied");
        applied = applied.saturating_add(1);
    }

    Ok(applied)
}

fn convert(mapping: &EnvMapping, raw: &str) -> ConfigResult<toml::Value> {
    let trimmed = raw.trim();
    match mapping.kind {
        EnvKind::Str => Ok(toml::Value::String(trimmed.to_owned())),
        EnvKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(toml::Value::Boolean(true)),
            "0" | "false" | "no" | "off" => Ok(toml::Value::Boolean(false)),
            _ => Err(ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a boolean, got '{raw}'"),
            }),
        },
        EnvKind::Count => trimmed
            .parse::<u32>()
            .map(|n| toml::Value::Integer(i64::from(n)))
            .map_err(|e| ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a non-negative integer: {e}"),
            }),
    }
}

fn lookup<'a>(root: &'a toml::Value, path: &str) -> Option<&'a toml::Value> {
    path.split('.').try_fold(root, |node, key| node.get(key))
}

fn insert(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut node = root;
    let mut keys = path.split('.').peekable();
    while let Some(key) = keys.next() {
        let Some(table) = node.as_table_mut() else {
            return;
        };
        if keys.peek().is_none() {
            table.insert(key.to_owned(), value);
            return;
        }
        node = table
            .entry(key.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
}
