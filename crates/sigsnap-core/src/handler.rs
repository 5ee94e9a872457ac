//! # Handler Variants
//!
//! The dispatch seam between signal delivery and rendering.
//!
//! A [`SnapshotHandler`] is invoked synchronously on the interrupted
//! thread with the frame captured at delivery. The three variants:
//!
//! - [`FullDump`]: renders the whole caller chain
//! - [`SingleVariable`]: reports one named local from the delivered frame
//! - [`InteractiveDebug`]: full dump, then a blocking inspection session
//!
//! ## Configuration
//!
//! Every handler owns its [`DumpOptions`]; nothing is ambient or
//! process-global. Width and depth stay adjustable after installation.
//! The sink handle is shared with the registrar, which reports binding
//! outcomes on it.
//!
//! ## Reentrancy
//!
//! Dispatch assumes at most one invocation in flight at a time. Two
//! signal kinds firing concurrently from different delivery contexts
//! would interleave writes on the sink; keeping that from happening is
//! the caller's responsibility, it is not guarded here.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::inspect::InspectSession;
use crate::types::{CapturedValue, FrameSnapshot, SignalKind};
use crate::walk::StackWalker;

/// Default display width when no terminal was probed.
pub const DEFAULT_COLUMNS: usize = 80;

/// Cloneable handle to a line-oriented output destination.
///
/// Clones share the underlying writer, so a handler and the registrar
/// that installed it report through the same stream. Defaults to the
/// process's standard output.
#[derive(Clone)]
pub struct OutputSink
{
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink
{
    /// Sink over an arbitrary writer.
    pub fn new(writer: Box<dyn Write + Send>) -> Self
    {
        Self { inner: Arc::new(Mutex::new(writer)) }
    }

    /// Sink over the process's standard output.
    #[must_use]
    pub fn stdout() -> Self
    {
        Self::new(Box::new(io::stdout()))
    }

    /// Run `f` with exclusive access to the writer.
    ///
    /// A poisoned lock is taken over rather than propagated; diagnostic
    /// output should still come out after another thread panicked.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn Write) -> R) -> R
    {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(writer.as_mut())
    }
}

impl Default for OutputSink
{
    fn default() -> Self
    {
        Self::stdout()
    }
}

impl fmt::Debug for OutputSink
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("OutputSink").finish_non_exhaustive()
    }
}

/// Explicit per-handler rendering configuration.
///
/// Owned by each handler instance for its whole lifetime and passed into
/// every rendering call. Columns and the depth bound are atomics so the
/// owner can adjust them after the handler is installed; the sink handle
/// is cloneable and shared.
#[derive(Debug)]
pub struct DumpOptions
{
    columns: AtomicUsize,
    max_levels: AtomicUsize,
    sink: OutputSink,
}

impl DumpOptions
{
    /// Default width (80), unbounded depth, stdout sink.
    #[must_use]
    pub fn new() -> Self
    {
        Self::with_sink(OutputSink::stdout())
    }

    /// Options reporting through `sink`.
    #[must_use]
    pub fn with_sink(sink: OutputSink) -> Self
    {
        Self {
            columns: AtomicUsize::new(DEFAULT_COLUMNS),
            max_levels: AtomicUsize::new(0),
            sink,
        }
    }

    /// Working display width in columns.
    #[must_use]
    pub fn columns(&self) -> usize
    {
        self.columns.load(Ordering::Relaxed)
    }

    /// Set the working display width.
    pub fn set_columns(&self, columns: usize)
    {
        self.columns.store(columns, Ordering::Relaxed);
    }

    /// Maximum caller levels to render; zero means unbounded.
    #[must_use]
    pub fn max_levels(&self) -> usize
    {
        self.max_levels.load(Ordering::Relaxed)
    }

    /// Bound the number of rendered caller levels (0 = unbounded).
    pub fn set_max_levels(&self, max_levels: usize)
    {
        self.max_levels.store(max_levels, Ordering::Relaxed);
    }

    /// Handle to the output sink.
    #[must_use]
    pub const fn sink(&self) -> &OutputSink
    {
        &self.sink
    }
}

impl Default for DumpOptions
{
    fn default() -> Self
    {
        Self::new()
    }
}

/// A snapshot handler dispatched on signal delivery.
///
/// The registrar calls [`invoke`](SnapshotHandler::invoke) synchronously
/// on the thread the signal interrupted; no thread or task is spawned.
/// Writer errors mid-dump are logged and swallowed, since there is no
/// caller to propagate them to inside a signal delivery.
pub trait SnapshotHandler: Send + Sync
{
    /// Variant name, used as the dump banner line.
    fn name(&self) -> &'static str;

    /// Configuration owned by this handler.
    fn options(&self) -> &DumpOptions;

    /// Handle one delivery against the captured frame.
    fn invoke(&self, kind: SignalKind, frame: &FrameSnapshot);
}

/// Renders the whole caller chain on every delivery.
#[derive(Debug, Default)]
pub struct FullDump
{
    options: DumpOptions,
}

impl FullDump
{
    /// Handler with default options (width 80, unbounded depth, stdout).
    #[must_use]
    pub fn new() -> Self
    {
        Self { options: DumpOptions::new() }
    }

    /// Handler with explicit options.
    #[must_use]
    pub const fn with_options(options: DumpOptions) -> Self
    {
        Self { options }
    }
}

impl SnapshotHandler for FullDump
{
    fn name(&self) -> &'static str
    {
        "FullDump"
    }

    fn options(&self) -> &DumpOptions
    {
        &self.options
    }

    fn invoke(&self, kind: SignalKind, frame: &FrameSnapshot)
    {
        tracing::debug!(signal = kind.name(), "rendering full stack dump");
        let walker = StackWalker::new(self.options.columns(), self.options.max_levels());
        let outcome = self.options.sink().with(|out| walker.dump(out, self.name(), frame));
        if let Err(error) = outcome {
            tracing::warn!(%error, "stack dump aborted");
        }
    }
}

/// Reports one named local from the delivered frame.
///
/// The stack is not walked: only the frame the signal landed in is
/// consulted. Until [`set_variable`](SingleVariable::set_variable) is
/// called, deliveries are silent no-ops.
#[derive(Debug, Default)]
pub struct SingleVariable
{
    options: DumpOptions,
    target: Mutex<Option<VariableTarget>>,
}

#[derive(Debug)]
struct VariableTarget
{
    name: String,
    default: CapturedValue,
}

impl SingleVariable
{
    /// Handler with default options.
    #[must_use]
    pub fn new() -> Self
    {
        Self::with_options(DumpOptions::new())
    }

    /// Handler with explicit options.
    #[must_use]
    pub fn with_options(options: DumpOptions) -> Self
    {
        Self { options, target: Mutex::new(None) }
    }

    /// Select the local to report, and the value written when the
    /// delivered frame has no binding of that name.
    pub fn set_variable(&self, name: impl Into<String>, default: impl Into<CapturedValue>)
    {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        *target = Some(VariableTarget { name: name.into(), default: default.into() });
    }
}

impl SnapshotHandler for SingleVariable
{
    fn name(&self) -> &'static str
    {
        "SingleVariable"
    }

    fn options(&self) -> &DumpOptions
    {
        &self.options
    }

    fn invoke(&self, _kind: SignalKind, frame: &FrameSnapshot)
    {
        let target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(target) = target.as_ref() else {
            // Never configured: stay silent, this is not an error
            return;
        };

        let rendered = frame
            .local(&target.name)
            .unwrap_or(&target.default)
            .rendered()
            .to_string();
        let outcome = self.options.sink().with(|out| -> io::Result<()> {
            writeln!(out, "{rendered}")?;
            out.flush()
        });
        if let Err(error) = outcome {
            tracing::warn!(%error, "single-variable report failed");
        }
    }
}

/// Full dump, then a blocking line-oriented inspection session.
///
/// This is the only variant that suspends the interrupted thread
/// indefinitely; it resumes when the operator ends the session.
#[derive(Debug, Default)]
pub struct InteractiveDebug
{
    options: DumpOptions,
}

impl InteractiveDebug
{
    /// Handler with default options.
    #[must_use]
    pub fn new() -> Self
    {
        Self { options: DumpOptions::new() }
    }

    /// Handler with explicit options.
    #[must_use]
    pub const fn with_options(options: DumpOptions) -> Self
    {
        Self { options }
    }
}

impl SnapshotHandler for InteractiveDebug
{
    fn name(&self) -> &'static str
    {
        "InteractiveDebug"
    }

    fn options(&self) -> &DumpOptions
    {
        &self.options
    }

    fn invoke(&self, kind: SignalKind, frame: &FrameSnapshot)
    {
        tracing::debug!(signal = kind.name(), "entering interactive inspection");
        let walker = StackWalker::new(self.options.columns(), self.options.max_levels());
        let dumped = self.options.sink().with(|out| walker.dump(out, self.name(), frame));
        if let Err(error) = dumped {
            tracing::warn!(%error, "stack dump aborted");
            return;
        }

        let session = InspectSession::new(frame, self.options.columns());
        let stdin = io::stdin();
        let outcome = self
            .options
            .sink()
            .with(|out| session.run(&mut stdin.lock(), out));
        if let Err(error) = outcome {
            tracing::warn!(%error, "inspection session ended with an error");
        }
    }
}
