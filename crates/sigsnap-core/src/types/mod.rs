//! # Types
//!
//! Data model shared by capture, rendering, and dispatch.
//!
//! These types carry no behavior beyond accessors: a frame chain is a
//! value, captured locals are values, and a signal kind is a label.
//! Everything that acts on them lives in the sibling modules.

pub mod frame;
pub mod signal;
pub mod value;

// Re-export all public types
pub use frame::{FrameSnapshot, FrameSource};
pub use signal::SignalKind;
pub use value::{CapturedValue, ValueKind};
