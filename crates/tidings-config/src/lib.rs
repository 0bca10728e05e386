#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Configuration for the tidings listener registry.
//!
//! A single [`Config`] type covers registry policy and logging. It is read
//! from an optional TOML file, topped up from `TIDINGS_*` environment
//! variables for any field the file left unset, then validated.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tidings_config::Config;
//!
//! let config = Config::load(Some(std::path::Path::new("tidings.toml"))).unwrap();
//! println!("isolating panics: {}", config.registry.isolate_panics);
//! ```
//!
//! # Precedence
//!
//! 1. **File** (`tidings.toml` or any path handed to [`Config::load`])
//! 2. **Environment variables** (`TIDINGS_*`), fallback only
//! 3. **Defaults** ([`Default`] impls on every section)
//!
//! This crate has **no dependencies on other internal tidings crates**.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load configuration from an optional file and the environment.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is malformed, an env var is
    /// invalid, or the result fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<Self> {
        loader::load(path)
    }

    /// Load configuration from a single file (no env fallbacks).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the string is malformed or fails
    /// validation.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        loader::parse_str(content, "<string>")
    }
}
