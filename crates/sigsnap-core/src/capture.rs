//! # Scope Instrumentation
//!
//! Explicit, thread-local scope records backing the in-tree frame
//! source.
//!
//! Code that wants to show up in snapshots enters a scope and records
//! named values into it:
//!
//! ```rust
//! use sigsnap_core::capture::enter_scope;
//!
//! fn churn(batch: u64)
//! {
//!     let scope = enter_scope("churn", file!(), line!());
//!     scope.record("batch", batch);
//!     // ... work; `scope` pops the record when it drops
//! }
//! ```
//!
//! The records form a per-thread stack; [`ThreadScopes`] snapshots that
//! stack into a [`FrameSnapshot`] chain when a signal arrives on the
//! same thread.
//!
//! ## Signal-delivery safety
//!
//! A signal can interrupt the thread while a record is being pushed,
//! popped, or written. Every access here goes through `try_borrow`, so
//! the worst case is a dropped capture (an empty snapshot, or one
//! missing the value being written), never a panic in the handler.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::types::{CapturedValue, FrameSnapshot, FrameSource};

/// Live instrumentation record for one entered scope.
struct ScopeRecord
{
    method: String,
    file: String,
    entry_line: u32,
    current_line: u32,
    locals: Vec<(String, CapturedValue)>,
}

impl ScopeRecord
{
    /// Scope-identity descriptor, stable for the lifetime of the scope.
    fn scope_identity(&self) -> String
    {
        format!("<scope {} at {}:{}>", self.method, self.file, self.entry_line)
    }
}

thread_local! {
    static SCOPES: RefCell<Vec<ScopeRecord>> = const { RefCell::new(Vec::new()) };
}

/// Enter an instrumented scope on the current thread.
///
/// The returned guard owns the record: values recorded through it show
/// up in snapshots taken on this thread, and the record is popped when
/// the guard drops. Scopes nest strictly; drop guards in reverse entry
/// order (letting them fall out of block scope does this naturally).
///
/// The `sigsnap` crate wraps this in a `snapshot_scope!` macro that
/// fills in `file!()` and `line!()`.
#[must_use = "the scope is popped again when the guard drops"]
pub fn enter_scope(method: impl Into<String>, file: impl Into<String>, line: u32) -> ScopeGuard
{
    let index = SCOPES.with(|scopes| match scopes.try_borrow_mut() {
        Ok(mut scopes) => {
            scopes.push(ScopeRecord {
                method: method.into(),
                file: file.into(),
                entry_line: line,
                current_line: line,
                locals: Vec::new(),
            });
            scopes.len() - 1
        }
        // A signal handler is snapshotting right now; the scope is lost
        // to it but the guard must still be valid.
        Err(_) => usize::MAX,
    });
    ScopeGuard { index, _not_send: PhantomData }
}

/// RAII guard for one instrumented scope.
///
/// Tied to the thread it was created on.
pub struct ScopeGuard
{
    index: usize,
    _not_send: PhantomData<*const ()>,
}

impl ScopeGuard
{
    /// Record a local binding, replacing any earlier binding of the same name.
    pub fn record(&self, name: impl Into<String>, value: impl Into<CapturedValue>)
    {
        let name = name.into();
        let value = value.into();
        SCOPES.with(|scopes| {
            if let Ok(mut scopes) = scopes.try_borrow_mut() {
                if let Some(record) = scopes.get_mut(self.index) {
                    match record.locals.iter_mut().find(|(existing, _)| *existing == name) {
                        Some((_, slot)) => *slot = value,
                        None => record.locals.push((name, value)),
                    }
                }
            }
        });
    }

    /// Update the scope's current source line.
    pub fn set_line(&self, line: u32)
    {
        SCOPES.with(|scopes| {
            if let Ok(mut scopes) = scopes.try_borrow_mut() {
                if let Some(record) = scopes.get_mut(self.index) {
                    record.current_line = line;
                }
            }
        });
    }
}

impl Drop for ScopeGuard
{
    fn drop(&mut self)
    {
        SCOPES.with(|scopes| {
            if let Ok(mut scopes) = scopes.try_borrow_mut() {
                scopes.truncate(self.index);
            }
        });
    }
}

/// Frame source over the calling thread's instrumented scopes.
///
/// Snapshotting from a signal handler observes the scopes of the thread
/// the signal interrupted, which is exactly the stack the operator asked
/// about.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScopes;

impl FrameSource for ThreadScopes
{
    fn snapshot(&self) -> Option<FrameSnapshot>
    {
        SCOPES.with(|scopes| {
            let scopes = scopes.try_borrow().ok()?;
            let mut chain: Option<FrameSnapshot> = None;
            for record in scopes.iter() {
                let mut frame = FrameSnapshot::new(
                    record.method.clone(),
                    record.current_line,
                    record.scope_identity(),
                );
                for (name, value) in &record.locals {
                    frame.record(name.clone(), value.clone());
                }
                if let Some(parent) = chain.take() {
                    frame = frame.with_parent(parent);
                }
                chain = Some(frame);
            }
            chain
        })
    }
}
