//! Tidings Test - Shared test utilities for tidings crates.
//!
//! Add as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! tidings-test.workspace = true
//! ```
//!
//! then record listener calls in tests:
//!
//! ```rust
//! use tidings_test::Recorder;
//!
//! let recorder = Recorder::<u32>::new();
//! let listener = recorder.sink("first");
//! listener(7);
//! assert_eq!(recorder.calls(), vec![("first", 7)]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod logging;
pub mod recorder;

pub use logging::{init_test_logging, test_log_config};
pub use recorder::Recorder;
