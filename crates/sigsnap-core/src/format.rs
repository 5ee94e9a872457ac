//! Per-frame block rendering.

use std::io::{self, Write};

use crate::layout::LocalsTable;
use crate::types::FrameSnapshot;

/// Renders one frame as a block of lines: method, line number, locals
/// table, scope identity, caller identity.
///
/// Writes only; the caller owns the flush cadence.
#[derive(Debug, Clone, Copy)]
pub struct FrameFormatter
{
    columns: usize,
}

impl FrameFormatter
{
    /// Formatter for a given display width.
    #[must_use]
    pub const fn new(columns: usize) -> Self
    {
        Self { columns }
    }

    /// Write the block for `frame` to `out`.
    ///
    /// ## Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_frame(&self, out: &mut dyn Write, frame: &FrameSnapshot) -> io::Result<()>
    {
        let table = LocalsTable::new(frame.locals(), self.columns);

        writeln!(out, "METHOD\t\t{}", frame.method())?;
        writeln!(out, "LINE NUMBER:\t{}", frame.line())?;
        writeln!(out, "{}", "-".repeat(self.columns))?;
        writeln!(out, "LOCALS")?;
        writeln!(out, "{table}")?;
        writeln!(out, "{}", "-".repeat(self.columns))?;
        writeln!(out, "SCOPE\t{}", frame.scope_identity())?;
        match frame.parent() {
            Some(parent) => writeln!(out, "CALLER\t{}", parent.scope_identity())?,
            None => writeln!(out, "CALLER\tNONE")?,
        }
        Ok(())
    }
}
