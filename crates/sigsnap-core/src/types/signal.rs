//! Logical trigger channels.

use std::fmt;

/// One of the three signal kinds an operator can use to request a snapshot.
///
/// These are logical channels; whether the host actually has the
/// corresponding signal is probed at registration time by the `sigsnap`
/// crate, never assumed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind
{
    /// `SIGINFO`, the BSD-family status signal (typically ctrl-T on a tty).
    Info,
    /// `SIGUSR1`.
    Usr1,
    /// `SIGUSR2`.
    Usr2,
}

impl SignalKind
{
    /// All kinds, in registration order.
    pub const ALL: [SignalKind; 3] = [SignalKind::Info, SignalKind::Usr1, SignalKind::Usr2];

    /// Short name as used by `kill -s` and in script filenames.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            SignalKind::Info => "INFO",
            SignalKind::Usr1 => "USR1",
            SignalKind::Usr2 => "USR2",
        }
    }

    /// Full signal name as reported to the operator.
    #[must_use]
    pub const fn signal_name(self) -> &'static str
    {
        match self {
            SignalKind::Info => "SIGINFO",
            SignalKind::Usr1 => "SIGUSR1",
            SignalKind::Usr2 => "SIGUSR2",
        }
    }
}

impl fmt::Display for SignalKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}
