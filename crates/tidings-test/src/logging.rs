//! Test logging.

use std::sync::Once;

use tidings_config::LoggingSection;
use tidings_telemetry::{LogConfig, TelemetryResult, setup_logging};

static INIT: Once = Once::new();

/// Logging configuration used by [`init_test_logging`].
///
/// Built from a [`LoggingSection`] the same way a binary would build it from
/// its loaded config: `warn` everywhere, `debug` for tidings crates.
///
/// # Errors
///
/// Returns an error if the section does not convert into a [`LogConfig`].
pub fn test_log_config() -> TelemetryResult<LogConfig> {
    let section = LoggingSection {
        level: "warn".to_owned(),
        directives: vec![
            "tidings_events=debug".to_owned(),
            "tidings_config=debug".to_owned(),
        ],
        ..LoggingSection::default()
    };

    Ok(LogConfig::try_from(&section)?
        .without_timestamps()
        .with_test_writer())
}

/// Route `tracing` output of the crate under test through libtest capture.
///
/// Safe to call from every test; only the first call installs the
/// subscriber. `RUST_LOG`-style directives are not read.
pub fn init_test_logging() {
    INIT.call_once(|| {
        if let Err(e) = test_log_config().and_then(|config| setup_logging(&config)) {
            // another harness already installed a global subscriber
            tracing::debug!(error = %e, "test logging not installed");
        }
    });
}
