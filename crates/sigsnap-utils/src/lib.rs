//! # sigsnap-utils
//!
//! Shared utilities for the sigsnap workspace, mainly the logging
//! bootstrap built on `tracing`.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{LogFormat, LogLevel, init_logging, init_logging_to_file, init_logging_with_level};
pub use tracing::{debug, error, info, trace, warn};
