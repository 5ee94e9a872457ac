//! Caller-chain traversal and block delimiting.

use std::io::{self, Write};

use crate::format::FrameFormatter;
use crate::types::FrameSnapshot;

/// Levels walked when the configured maximum is zero (unbounded).
const UNBOUNDED_LEVELS: usize = 1000;

/// Walks the caller chain from the delivered frame and renders one
/// delimited block per level.
///
/// The delivered frame is level 0; each parent is one level further out.
/// The walk stops at the root or after `max_levels` rendered levels,
/// whichever comes first.
#[derive(Debug, Clone, Copy)]
pub struct StackWalker
{
    columns: usize,
    max_levels: usize,
}

impl StackWalker
{
    /// Walker for a display width and a depth bound (0 = unbounded).
    #[must_use]
    pub const fn new(columns: usize, max_levels: usize) -> Self
    {
        Self { columns, max_levels }
    }

    /// Render `banner`, then every level from `frame` outward.
    ///
    /// Output is flushed after every block, so partial dumps survive a
    /// crash or hang mid-walk. The walk itself never suspends.
    ///
    /// A cycle in the parent chain would be a frame-source bug; the
    /// depth bound is the only backstop against one here.
    ///
    /// ## Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn dump(&self, out: &mut dyn Write, banner: &str, frame: &FrameSnapshot) -> io::Result<()>
    {
        let depth = if self.max_levels == 0 { UNBOUNDED_LEVELS } else { self.max_levels };
        let formatter = FrameFormatter::new(self.columns);

        writeln!(out)?;
        writeln!(out, "{banner}")?;

        let mut current = Some(frame);
        for level in 0..depth {
            let Some(frame) = current else { break };
            writeln!(out)?;
            writeln!(out, "{}", "=".repeat(self.columns))?;
            writeln!(out, "LEVEL    \t{level}")?;
            formatter.write_frame(out, frame)?;
            writeln!(out, "{}", "=".repeat(self.columns))?;
            out.flush()?;
            current = frame.parent();
        }
        out.flush()?;
        Ok(())
    }
}
