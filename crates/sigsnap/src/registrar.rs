//! # Signal Registrar
//!
//! Binds snapshot handlers to OS signals and reports the outcome.
//!
//! Availability is probed, never assumed: `SIGINFO` only exists on
//! BSD-family hosts, and requesting it elsewhere just produces a
//! "not available" line. Binding outcomes are written to the handler's
//! own sink so the operator sees them next to later dumps.

use std::io;
use std::process;
use std::sync::Arc;

use sigsnap_core::types::SignalKind;
use sigsnap_core::{FrameSource, SnapshotError, SnapshotHandler, SnapshotResult};

use crate::term;

/// Which signal kinds to request at installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalSelection
{
    /// Request `SIGINFO` (BSD-family hosts only).
    pub info: bool,
    /// Request `SIGUSR1`.
    pub usr1: bool,
    /// Request `SIGUSR2`.
    pub usr2: bool,
}

impl SignalSelection
{
    /// No kinds at all. Installing with this still reports one line.
    #[must_use]
    pub const fn none() -> Self
    {
        Self { info: false, usr1: false, usr2: false }
    }

    /// Every kind the host turns out to support.
    #[must_use]
    pub const fn all() -> Self
    {
        Self { info: true, usr1: true, usr2: true }
    }

    const fn requested(self, kind: SignalKind) -> bool
    {
        match kind {
            SignalKind::Info => self.info,
            SignalKind::Usr1 => self.usr1,
            SignalKind::Usr2 => self.usr2,
        }
    }

    const fn is_empty(self) -> bool
    {
        !self.info && !self.usr1 && !self.usr2
    }
}

impl Default for SignalSelection
{
    /// `INFO` and `USR1` requested, `USR2` left alone.
    fn default() -> Self
    {
        Self { info: true, usr1: true, usr2: false }
    }
}

#[cfg(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
))]
const SIGINFO: Option<libc::c_int> = Some(libc::SIGINFO);
#[cfg(not(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
const SIGINFO: Option<libc::c_int> = None;

/// Host signal number for a kind, `None` when the host lacks it.
const fn signal_number(kind: SignalKind) -> Option<libc::c_int>
{
    match kind {
        SignalKind::Info => SIGINFO,
        SignalKind::Usr1 => Some(libc::SIGUSR1),
        SignalKind::Usr2 => Some(libc::SIGUSR2),
    }
}

/// Installed signal bindings driving one handler.
///
/// Created by [`Registrar::install`]; the bindings live exactly as long
/// as this value and are unregistered on drop.
///
/// Dispatch is not reentrant. The handler runs synchronously on the
/// interrupted thread, and at most one invocation is assumed in flight
/// at a time; see the crate docs.
pub struct Registrar
{
    pid: u32,
    bound: Vec<SignalKind>,
    registrations: Vec<signal_hook::SigId>,
    handler: Arc<dyn SnapshotHandler>,
}

impl Registrar
{
    /// Bind `handler` to every supported kind in `selection`.
    ///
    /// For each requested kind this reports either a listening line and
    /// an example send command, or a "not available" line, on the
    /// handler's sink; requesting nothing reports a single
    /// `No signal specified` line. The sink is flushed once all three
    /// kinds are processed.
    ///
    /// Afterwards the terminal is probed and the working width stored
    /// into the handler's options (`max(80, columns - 20)`, or 80 when
    /// there is no usable terminal).
    ///
    /// ## Errors
    ///
    /// Returns an error when writing to the sink fails or when the OS
    /// rejects a handler registration. An unsupported kind is not an
    /// error.
    pub fn install(
        selection: SignalSelection,
        handler: Arc<dyn SnapshotHandler>,
        source: Arc<dyn FrameSource>,
    ) -> SnapshotResult<Self>
    {
        let pid = process::id();
        let sink = handler.options().sink().clone();
        let mut bound = Vec::new();
        let mut registrations: Vec<signal_hook::SigId> = Vec::new();

        for kind in SignalKind::ALL {
            if !selection.requested(kind) {
                continue;
            }
            match signal_number(kind) {
                Some(signo) => {
                    let registered =
                        register_dispatch(signo, kind, Arc::clone(&handler), Arc::clone(&source));
                    let sig_id = match registered {
                        Ok(sig_id) => sig_id,
                        Err(error) => {
                            // Roll back what was already bound
                            for sig_id in registrations.drain(..) {
                                signal_hook::low_level::unregister(sig_id);
                            }
                            return Err(error);
                        }
                    };
                    registrations.push(sig_id);
                    bound.push(kind);
                    tracing::debug!(signal = kind.signal_name(), "handler installed");

                    sink.with(|out| -> io::Result<()> {
                        writeln!(out, "Listening for >>{}<<", kind.signal_name())?;
                        writeln!(out, "==> kill -s {} {}", kind.name(), pid)
                    })?;
                }
                None => {
                    tracing::debug!(signal = kind.signal_name(), "not supported on this host");
                    sink.with(|out| writeln!(out, "No {} available", kind.signal_name()))?;
                }
            }
        }

        if selection.is_empty() {
            sink.with(|out| writeln!(out, "No signal specified"))?;
        }
        sink.with(|out| out.flush())?;

        handler.options().set_columns(term::working_columns());

        Ok(Self { pid, bound, registrations, handler })
    }

    /// Kinds actually bound on this host.
    #[must_use]
    pub fn bound(&self) -> &[SignalKind]
    {
        &self.bound
    }

    /// Process id reported in the operator lines and trigger scripts.
    #[must_use]
    pub const fn pid(&self) -> u32
    {
        self.pid
    }

    /// The handler driven by these bindings.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn SnapshotHandler>
    {
        &self.handler
    }
}

impl Drop for Registrar
{
    fn drop(&mut self)
    {
        for sig_id in self.registrations.drain(..) {
            signal_hook::low_level::unregister(sig_id);
        }
    }
}

/// Register the dispatch closure for one signal number.
///
/// The closure runs on whichever thread the OS delivers the signal to,
/// snapshots that thread's frames, and invokes the handler with the
/// result. A delivery that captures no frame (nothing instrumented, or
/// the record was mid-mutation) is silently dropped.
fn register_dispatch(
    signo: libc::c_int,
    kind: SignalKind,
    handler: Arc<dyn SnapshotHandler>,
    source: Arc<dyn FrameSource>,
) -> SnapshotResult<signal_hook::SigId>
{
    let registered = unsafe {
        signal_hook::low_level::register(signo, move || {
            if let Some(frame) = source.snapshot() {
                handler.invoke(kind, &frame);
            }
        })
    };
    registered.map_err(|error| SnapshotError::BindFailed {
        signal: kind.signal_name().to_string(),
        details: error.to_string(),
    })
}
