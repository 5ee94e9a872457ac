//! # Error Types
//!
//! General error handling for snapshot capture and rendering.
//!
//! We use `thiserror` to automatically generate `Error` trait
//! implementations and nice error messages.
//!
//! Most failure modes in this system are absorbed with a documented
//! fallback (unsupported signal kinds, failed width probes, missing
//! locals) and never reach this type. What remains is I/O on the output
//! sink or the script files, and signal-binding failures.

use thiserror::Error;

/// Main error type for snapshot operations
#[derive(Error, Debug)]
pub enum SnapshotError
{
    /// I/O error (output sink writes, script file creation, etc.)
    ///
    /// Script-file creation failures propagate through this variant
    /// uncaught; there is no fallback for an unwritable target.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registering an OS signal handler failed
    ///
    /// This is distinct from a signal kind the host simply does not
    /// have; unsupported kinds are reported on the sink and skipped,
    /// they never produce this error.
    #[error("Failed to bind {signal}: {details}")]
    BindFailed
    {
        /// Full signal name (e.g. `SIGUSR1`)
        signal: String,
        /// Error reported by the registration call
        details: String,
    },
}

/// Convenience type alias for `Result<T, SnapshotError>`
pub type SnapshotResult<T> = std::result::Result<T, SnapshotError>;
