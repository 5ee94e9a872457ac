//! # sigsnap-core
//!
//! Frame capture and rendering primitives for sigsnap.
//!
//! This crate owns everything between "a signal was delivered" and
//! "lines were written to the sink":
//! - The snapshot frame model and the [`FrameSource`] capability seam
//! - Explicit scope instrumentation backing the in-tree frame source
//! - The proportional column layout for locals tables
//! - Per-frame formatting and caller-chain walking
//! - The three handler variants (full dump, single variable, interactive)
//!
//! ## Why instrumentation?
//!
//! A Python-style runtime can enumerate any live frame's locals by name;
//! Rust cannot. Code that wants to show up in snapshots opts in through
//! [`enter_scope`] and [`ScopeGuard::record`], and the snapshot is taken
//! over that recorded stack. A host debugging interface could supply
//! frames instead by implementing [`FrameSource`].
//!
//! OS-signal binding lives in the `sigsnap` crate; nothing here touches
//! signal numbers or the terminal.

pub mod capture;
pub mod error;
pub mod format;
pub mod handler;
pub mod inspect;
pub mod layout;
pub mod types;
pub mod walk;

pub use capture::{ScopeGuard, ThreadScopes, enter_scope};
// Re-export commonly used types
pub use error::{SnapshotError, SnapshotResult};
pub use handler::{
    DEFAULT_COLUMNS, DumpOptions, FullDump, InteractiveDebug, OutputSink, SingleVariable, SnapshotHandler,
};
pub use types::{CapturedValue, FrameSnapshot, FrameSource, SignalKind, ValueKind};
