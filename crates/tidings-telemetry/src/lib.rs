//! Tidings Telemetry - Logging setup for the tidings listener registry.
//!
//! The registry crates only emit through the `tracing` facade. This crate
//! installs a `tracing-subscriber` pipeline for binaries and tests that want
//! to see those events.
//!
//! # Example
//!
//! ```rust,no_run
//! use tidings_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), tidings_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("tidings_events=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_default_logging, setup_logging};
