//! # sigsnap
//!
//! Signal-triggered call-stack snapshots for long-running processes.
//!
//! Bind handlers for up to three signal kinds (`SIGINFO`, `SIGUSR1`,
//! `SIGUSR2`); when one arrives, the handler renders the interrupted
//! thread's instrumented call stack (method names, line positions, and
//! a fixed-width table of live local bindings) to its configured sink.
//! A live-diagnostics hook, not a debugger: nothing is sampled, nothing
//! is traced persistently, and program behavior is never modified.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sigsnap::{FullDump, Registrar, SignalSelection, ThreadScopes};
//!
//! # fn main() -> sigsnap::SnapshotResult<()> {
//! let handler = Arc::new(FullDump::new());
//! let _registrar = Registrar::install(
//!     SignalSelection::default(),
//!     handler,
//!     Arc::new(ThreadScopes),
//! )?;
//!
//! let scope = sigsnap::snapshot_scope!("main_loop");
//! loop {
//!     scope.record("iteration", 42u64);
//!     // ... work; `kill -s USR1 <pid>` dumps the stack
//! }
//! # }
//! ```
//!
//! ## What shows up in a snapshot
//!
//! Rust cannot enumerate arbitrary live locals by name, so observed
//! code opts in through the scope instrumentation API
//! ([`snapshot_scope!`], [`ScopeGuard::record`]). Any other frame
//! provider can stand in behind the [`FrameSource`] trait.
//!
//! ## Caveats
//!
//! - Unix only; `SIGINFO` additionally requires a BSD-family host.
//! - Handler dispatch runs synchronously on the interrupted thread and
//!   is **not reentrant**: keep at most one snapshot signal in flight
//!   at a time. Two kinds firing concurrently would interleave on the
//!   sink; guarding against that is the caller's responsibility.

// Registering a handler that runs on signal delivery is an unsafe API
// (signal_hook::low_level::register); this crate is the one place in
// the workspace allowed to use it.
#![allow(unsafe_code)]

pub mod registrar;
mod scripts;
pub mod term;

pub use registrar::{Registrar, SignalSelection};
// Re-export the core surface so embedders need a single dependency
pub use sigsnap_core::{
    CapturedValue, DumpOptions, FrameSnapshot, FrameSource, FullDump, InteractiveDebug, OutputSink,
    ScopeGuard, SignalKind, SingleVariable, SnapshotError, SnapshotHandler, SnapshotResult,
    ThreadScopes, ValueKind, enter_scope,
};

/// Enter an instrumented scope named after the enclosing method,
/// filling in the current file and line.
///
/// ```rust
/// fn churn()
/// {
///     let scope = sigsnap::snapshot_scope!("churn");
///     scope.record("phase", "warmup");
/// }
/// ```
#[macro_export]
macro_rules! snapshot_scope {
    ($method:expr) => {
        $crate::enter_scope($method, file!(), line!())
    };
}
