//! Logging configuration and setup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter, TestWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Helper to convert init errors to our error type.
fn init_err<E: std::fmt::Display>(e: E) -> TelemetryError {
    TelemetryError::InitError(e.to_string())
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format.
    Pretty,
    /// Compact single-line format (default).
    #[default]
    Compact,
    /// JSON format for structured logging.
    Json,
    /// Full format with all fields.
    Full,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            "full" => Ok(Self::Full),
            other => Err(TelemetryError::ConfigError(format!(
                "unknown log format '{other}'"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
    /// Directive overrides (e.g., `tidings_events=trace`).
    #[serde(default)]
    pub directives: Vec<String>,
    /// Whether to include timestamps.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Route output through the libtest capture instead of stderr.
    #[serde(default)]
    pub test_writer: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            directives: Vec::new(),
            timestamps: true,
            ansi: true,
            test_writer: false,
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Write through libtest's captured output.
    #[must_use]
    pub fn with_test_writer(mut self) -> Self {
        self.test_writer = true;
        self.ansi = false;
        self
    }

    /// Build the env filter from config.
    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| TelemetryError::ConfigError(e.to_string()))?;

        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| {
                    TelemetryError::ConfigError(e.to_string())
                },
            )?);
        }

        Ok(filter)
    }

    fn build_layer(&self) -> BoxedLayer {
        if self.test_writer {
            fmt_layer(self, TestWriter::new())
        } else {
            fmt_layer(self, std::io::stderr)
        }
    }
}

#[cfg(feature = "config")]
impl TryFrom<&tidings_config::LoggingSection> for LogConfig {
    type Error = TelemetryError;

    fn try_from(section: &tidings_config::LoggingSection) -> Result<Self, Self::Error> {
        Ok(Self {
            level: section.level.clone(),
            format: section.format.parse()?,
            directives: section.directives.clone(),
            ..Self::default()
        })
    }
}

fn fmt_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let base = fmt::layer().with_writer(writer).with_ansi(config.ansi);

    match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => base.pretty().boxed(),
        (LogFormat::Pretty, false) => base.pretty().without_time().boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Json, true) => base.json().boxed(),
        (LogFormat::Json, false) => base.json().without_time().boxed(),
        (LogFormat::Full, true) => base.boxed(),
        (LogFormat::Full, false) => base.without_time().boxed(),
    }
}

/// Set up logging with the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a global subscriber
/// is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;

    tracing_subscriber::registry()
        .with(config.build_layer())
        .with(filter)
        .try_init()
        .map_err(init_err)
}

/// Set up default logging (info level, stderr, compact format).
///
/// # Errors
///
/// Returns an error if logging cannot be initialized.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.timestamps);
        assert!(config.ansi);
        assert!(!config.test_writer);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .without_timestamps()
            .with_directive("tidings_events=trace");

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.timestamps);
        assert_eq!(config.directives, vec!["tidings_events=trace"]);
    }

    #[test]
    fn test_test_writer_disables_ansi() {
        let config = LogConfig::default().with_test_writer();
        assert!(config.test_writer);
        assert!(!config.ansi);
    }

    #[test]
    fn test_log_config_serialization() {
        let config = LogConfig::new("warn").with_format(LogFormat::Pretty);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"level\":\"warn\""));
        assert!(json.contains("\"format\":\"pretty\""));

        let parsed: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" full ".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_build_filter_with_directives() {
        let config = LogConfig::new("info").with_directive("tidings_events=trace");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_directive() {
        let config = LogConfig::new("info").with_directive("tidings_events=shouting");
        assert!(config.build_filter().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_logging_section() {
        let section = tidings_config::LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["tidings_events=trace".to_owned()],
        };

        let config = LogConfig::try_from(&section).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives.len(), 1);
    }
}
