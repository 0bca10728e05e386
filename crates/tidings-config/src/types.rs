//! Configuration types for tidings.
//!
//! Every struct implements [`Default`] so that a bare `[section]` header in
//! TOML, or no file at all, produces a working configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Behaviour of every category registry created by a registry context.
    pub registry: RegistrySection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// RegistrySection
// ---------------------------------------------------------------------------

/// Category registry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    /// Catch a panicking listener, log it, and keep broadcasting to the
    /// remaining listeners. Off by default: a listener panic reaches the
    /// caller of `invoke` and the remaining listeners are skipped.
    pub isolate_panics: bool,
    /// Emit a warning once a single registry holds more than this many
    /// listeners. `0` disables the warning.
    pub warn_listener_count: usize,
    /// Number of entries reserved up front in each new registry.
    pub initial_capacity: usize,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            isolate_panics: false,
            warn_listener_count: 256,
            initial_capacity: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["tidings_events=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bare_section_yields_section_defaults() {
        let config: Config = toml::from_str("[registry]\n").unwrap();
        assert!(!config.registry.isolate_panics);
        assert_eq!(config.registry.warn_listener_count, 256);
        assert_eq!(config.registry.initial_capacity, 4);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [registry]
            isolate_panics = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.registry.isolate_panics);
        assert_eq!(config.registry.warn_listener_count, 256);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }
}
