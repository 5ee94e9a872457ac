//! Line-oriented inspection session over a snapshot chain.
//!
//! The interactive handler hands the terminal to the operator after its
//! dump. The session is scoped to the delivered snapshot: it can move
//! along the caller chain and print bindings, but it cannot touch the
//! interrupted program's live state.
//!
//! Input and output are injected, so the loop runs against a terminal
//! in production and against buffers in tests.

use std::io::{self, BufRead, Write};

use crate::layout::LocalsTable;
use crate::types::FrameSnapshot;

const PROMPT: &str = "(sigsnap) ";

/// Interactive inspector over one snapshot chain.
///
/// Blocks the calling thread in [`run`](InspectSession::run) until the
/// operator ends the session with `quit`, `continue`, or end-of-input.
pub struct InspectSession<'a>
{
    frames: Vec<&'a FrameSnapshot>,
    current: usize,
    columns: usize,
}

impl<'a> InspectSession<'a>
{
    /// Session starting at the delivered (innermost) frame.
    #[must_use]
    pub fn new(frame: &'a FrameSnapshot, columns: usize) -> Self
    {
        let mut frames = Vec::new();
        let mut cursor = Some(frame);
        while let Some(frame) = cursor {
            frames.push(frame);
            cursor = frame.parent();
        }
        Self { frames, current: 0, columns }
    }

    /// Run the command loop until the operator ends the session.
    ///
    /// ## Errors
    ///
    /// Returns any error from the underlying reader or writer.
    pub fn run(mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()>
    {
        writeln!(out, "Waiting for your command")?;
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // End of input counts as quit
                break;
            }
            let line = line.trim();
            let (command, argument) = match line.split_once(char::is_whitespace) {
                Some((command, argument)) => (command, argument.trim()),
                None => (line, ""),
            };

            match command {
                "" => {}
                "locals" | "l" => self.cmd_locals(out)?,
                "print" | "p" => self.cmd_print(out, argument)?,
                "where" | "w" => self.cmd_where(out)?,
                "up" => self.cmd_move(out, 1)?,
                "down" => self.cmd_move(out, -1)?,
                "help" | "?" => Self::cmd_help(out)?,
                "quit" | "q" | "continue" | "c" => break,
                other => writeln!(out, "unknown command: {other} (try 'help')")?,
            }
        }
        out.flush()?;
        Ok(())
    }

    fn current_frame(&self) -> &FrameSnapshot
    {
        self.frames[self.current]
    }

    fn cmd_locals(&self, out: &mut dyn Write) -> io::Result<()>
    {
        let table = LocalsTable::new(self.current_frame().locals(), self.columns);
        writeln!(out, "{table}")
    }

    fn cmd_print(&self, out: &mut dyn Write, name: &str) -> io::Result<()>
    {
        if name.is_empty() {
            return writeln!(out, "usage: print <name>");
        }
        match self.current_frame().local(name) {
            Some(value) => writeln!(out, "{value}"),
            None => writeln!(out, "<not bound>"),
        }
    }

    fn cmd_where(&self, out: &mut dyn Write) -> io::Result<()>
    {
        for (level, frame) in self.frames.iter().enumerate() {
            let marker = if level == self.current { '*' } else { ' ' };
            writeln!(out, "{marker} LEVEL {level}\t{} (line {})", frame.method(), frame.line())?;
        }
        Ok(())
    }

    /// Move the cursor along the chain: positive toward the root,
    /// negative toward the delivered frame.
    fn cmd_move(&mut self, out: &mut dyn Write, step: isize) -> io::Result<()>
    {
        let target = self.current.checked_add_signed(step);
        match target {
            Some(target) if target < self.frames.len() => {
                self.current = target;
                let frame = self.current_frame();
                writeln!(out, "LEVEL {}\t{} (line {})", self.current, frame.method(), frame.line())
            }
            _ if step > 0 => writeln!(out, "already at the outermost frame"),
            _ => writeln!(out, "already at the innermost frame"),
        }
    }

    fn cmd_help(out: &mut dyn Write) -> io::Result<()>
    {
        writeln!(out, "locals        show the current frame's bindings")?;
        writeln!(out, "print <name>  show one binding")?;
        writeln!(out, "where         list the frame chain")?;
        writeln!(out, "up / down     move along the chain")?;
        writeln!(out, "quit          end the session and resume")?;
        Ok(())
    }
}
