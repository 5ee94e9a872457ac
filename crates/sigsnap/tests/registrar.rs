//! Tests for signal selection, binding reports, and dispatch

use std::io::Write;
use std::sync::{Arc, Mutex};

use sigsnap::{
    DumpOptions, FullDump, OutputSink, Registrar, SignalKind, SignalSelection, SnapshotHandler,
    ThreadScopes,
};

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

fn buffered_handler() -> (Arc<FullDump>, SharedBuffer)
{
    let buffer = SharedBuffer::default();
    let options = DumpOptions::with_sink(OutputSink::new(Box::new(buffer.clone())));
    (Arc::new(FullDump::with_options(options)), buffer)
}

#[test]
fn test_no_signal_selected_reports_one_line()
{
    let (handler, buffer) = buffered_handler();
    let registrar = Registrar::install(SignalSelection::none(), handler, Arc::new(ThreadScopes))
        .expect("install with an empty selection succeeds");

    assert_eq!(buffer.contents(), "No signal specified\n");
    assert!(registrar.bound().is_empty());
}

#[test]
fn test_default_selection_requests_info_and_usr1()
{
    let selection = SignalSelection::default();
    assert!(selection.info);
    assert!(selection.usr1);
    assert!(!selection.usr2);
}

#[test]
fn test_usr2_binding_reports_listening_and_send_command()
{
    let (handler, buffer) = buffered_handler();
    let selection = SignalSelection { info: false, usr1: false, usr2: true };
    let registrar = Registrar::install(selection, handler, Arc::new(ThreadScopes))
        .expect("SIGUSR2 is available on unix hosts");

    let output = buffer.contents();
    assert!(output.contains("Listening for >>SIGUSR2<<"));
    assert!(output.contains(&format!("==> kill -s USR2 {}", registrar.pid())));
    assert_eq!(registrar.bound(), &[SignalKind::Usr2][..]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_siginfo_unavailable_on_linux()
{
    let (handler, buffer) = buffered_handler();
    let selection = SignalSelection { info: true, usr1: false, usr2: false };
    let registrar = Registrar::install(selection, handler, Arc::new(ThreadScopes))
        .expect("an unsupported kind is not an error");

    assert_eq!(buffer.contents(), "No SIGINFO available\n");
    assert!(registrar.bound().is_empty());
}

#[test]
fn test_probed_width_is_at_least_default()
{
    let (handler, _buffer) = buffered_handler();
    let registrar = Registrar::install(SignalSelection::none(), Arc::clone(&handler) as Arc<dyn SnapshotHandler>, Arc::new(ThreadScopes))
        .expect("install succeeds");

    // With or without a terminal, the working width never drops below 80
    assert!(registrar.handler().options().columns() >= 80);
}

#[test]
fn test_raised_usr1_renders_a_dump()
{
    let (handler, buffer) = buffered_handler();
    let selection = SignalSelection { info: false, usr1: true, usr2: false };
    let _registrar = Registrar::install(selection, handler, Arc::new(ThreadScopes))
        .expect("SIGUSR1 is available on unix hosts");

    let scope = sigsnap::snapshot_scope!("raise_target");
    scope.record("ready", true);

    signal_hook::low_level::raise(libc::SIGUSR1).expect("raise SIGUSR1");

    let output = buffer.contents();
    assert!(output.contains("FullDump"));
    assert!(output.contains("METHOD\t\traise_target"));
    assert!(output.contains("ready"));
}
