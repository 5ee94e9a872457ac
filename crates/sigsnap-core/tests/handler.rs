//! Tests for the handler variants and the inspection session

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use sigsnap_core::handler::{DumpOptions, FullDump, OutputSink, SingleVariable, SnapshotHandler};
use sigsnap_core::inspect::InspectSession;
use sigsnap_core::types::{FrameSnapshot, SignalKind};

/// Cloneable in-memory writer so tests can read back sink output.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer
{
    fn contents(&self) -> String
    {
        String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("output is UTF-8")
    }
}

impl Write for SharedBuffer
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize>
    {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()>
    {
        Ok(())
    }
}

fn buffered_options() -> (DumpOptions, SharedBuffer)
{
    let buffer = SharedBuffer::default();
    let options = DumpOptions::with_sink(OutputSink::new(Box::new(buffer.clone())));
    (options, buffer)
}

fn frame_with_x() -> FrameSnapshot
{
    let mut frame = FrameSnapshot::new("work", 12, "<scope work at demo.rs:10>");
    frame.record("x", 12i64);
    frame
}

#[test]
fn test_single_variable_reports_bound_value()
{
    let (options, buffer) = buffered_options();
    let handler = SingleVariable::with_options(options);
    handler.set_variable("x", "none");

    handler.invoke(SignalKind::Usr1, &frame_with_x());
    assert_eq!(buffer.contents(), "12\n");
}

#[test]
fn test_single_variable_reports_default_when_absent()
{
    let (options, buffer) = buffered_options();
    let handler = SingleVariable::with_options(options);
    handler.set_variable("x", "none");

    let frame = FrameSnapshot::new("idle", 3, "<scope idle at demo.rs:1>");
    handler.invoke(SignalKind::Usr1, &frame);
    assert_eq!(buffer.contents(), "none\n");
}

#[test]
fn test_single_variable_unconfigured_is_a_no_op()
{
    let (options, buffer) = buffered_options();
    let handler = SingleVariable::with_options(options);

    handler.invoke(SignalKind::Usr1, &frame_with_x());
    assert_eq!(buffer.contents(), "");
}

#[test]
fn test_single_variable_ignores_parent_frames()
{
    let (options, buffer) = buffered_options();
    let handler = SingleVariable::with_options(options);
    handler.set_variable("x", "none");

    // `x` is bound only in the caller; the delivered frame wins
    let frame = FrameSnapshot::new("leaf", 7, "<scope leaf at demo.rs:5>").with_parent(frame_with_x());
    handler.invoke(SignalKind::Usr2, &frame);
    assert_eq!(buffer.contents(), "none\n");
}

#[test]
fn test_full_dump_banner_and_levels()
{
    let (options, buffer) = buffered_options();
    options.set_max_levels(1);
    let handler = FullDump::with_options(options);

    let frame = frame_with_x().with_parent(FrameSnapshot::new("main", 1, "<scope main at demo.rs:1>"));
    handler.invoke(SignalKind::Usr1, &frame);

    let output = buffer.contents();
    assert!(output.contains("FullDump"));
    assert_eq!(output.lines().filter(|line| line.starts_with("LEVEL")).count(), 1);
    assert!(output.contains("METHOD\t\twork"));
}

#[test]
fn test_full_dump_respects_configured_width()
{
    let (options, buffer) = buffered_options();
    options.set_columns(40);
    let handler = FullDump::with_options(options);

    handler.invoke(SignalKind::Info, &frame_with_x());
    assert!(buffer.contents().contains(&"=".repeat(40)));
}

#[test]
fn test_inspect_session_locals_and_print()
{
    let frame = frame_with_x();
    let session = InspectSession::new(&frame, 80);

    let mut input = Cursor::new("locals\nprint x\nprint missing\nquit\n");
    let mut out = Vec::new();
    session.run(&mut input, &mut out).expect("session runs to completion");

    let output = String::from_utf8(out).expect("output is UTF-8");
    assert!(output.starts_with("Waiting for your command\n"));
    assert!(output.contains("VARIABLE"));
    assert!(output.contains("12"));
    assert!(output.contains("<not bound>"));
}

#[test]
fn test_inspect_session_moves_along_the_chain()
{
    let outer = FrameSnapshot::new("outer", 2, "<scope outer at demo.rs:1>");
    let frame = frame_with_x().with_parent(outer);
    let session = InspectSession::new(&frame, 80);

    let mut input = Cursor::new("up\nup\ndown\nwhere\nquit\n");
    let mut out = Vec::new();
    session.run(&mut input, &mut out).expect("session runs to completion");

    let output = String::from_utf8(out).expect("output is UTF-8");
    assert!(output.contains("LEVEL 1\touter (line 2)"));
    assert!(output.contains("already at the outermost frame"));
    assert!(output.contains("* LEVEL 0\twork (line 12)"));
}

#[test]
fn test_inspect_session_ends_on_eof()
{
    let frame = frame_with_x();
    let session = InspectSession::new(&frame, 80);

    let mut input = Cursor::new("locals\n");
    let mut out = Vec::new();
    session.run(&mut input, &mut out).expect("EOF ends the session");
}

#[test]
fn test_handler_names_match_variants()
{
    assert_eq!(FullDump::new().name(), "FullDump");
    assert_eq!(SingleVariable::new().name(), "SingleVariable");
}
