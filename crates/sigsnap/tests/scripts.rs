//! Tests for trigger-script generation

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;

use sigsnap::{DumpOptions, FullDump, OutputSink, Registrar, SignalSelection, ThreadScopes};

fn installed_registrar() -> Registrar
{
    // Sink output is irrelevant here; these tests only look at the filesystem
    let options = DumpOptions::with_sink(OutputSink::new(Box::new(std::io::sink())));
    let selection = SignalSelection { info: false, usr1: false, usr2: true };
    Registrar::install(selection, Arc::new(FullDump::with_options(options)), Arc::new(ThreadScopes))
        .expect("SIGUSR2 is available on unix hosts")
}

#[test]
fn test_scripts_written_per_bound_kind()
{
    let registrar = installed_registrar();
    let dir = tempfile::tempdir().expect("create temp dir");

    let written = registrar
        .create_signal_scripts(Some(dir.path()), "demo-", false)
        .expect("script creation succeeds");

    assert_eq!(written.len(), 1);
    let path = &written[0];
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("demo-sigsnap-USR2"));

    let contents = fs::read_to_string(path).expect("script is readable");
    assert_eq!(contents, format!("#!/bin/sh\nkill -s USR2 {}\n", registrar.pid()));

    let mode = fs::metadata(path).expect("script metadata").permissions().mode();
    assert_ne!(mode & 0o111, 0, "script must be executable");
}

#[test]
fn test_existing_script_skipped_without_overwrite()
{
    let registrar = installed_registrar();
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("sigsnap-USR2");
    fs::write(&path, "placeholder").expect("seed existing file");

    let written = registrar
        .create_signal_scripts(Some(dir.path()), "", false)
        .expect("script creation succeeds");

    assert!(written.is_empty());
    assert_eq!(fs::read_to_string(&path).expect("file is readable"), "placeholder");
}

#[test]
fn test_existing_script_replaced_with_overwrite()
{
    let registrar = installed_registrar();
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("sigsnap-USR2");
    fs::write(&path, "placeholder").expect("seed existing file");

    let written = registrar
        .create_signal_scripts(Some(dir.path()), "", true)
        .expect("script creation succeeds");

    assert_eq!(written.len(), 1);
    let contents = fs::read_to_string(&path).expect("file is readable");
    assert!(contents.starts_with("#!/bin/sh\n"));
}

#[test]
fn test_unwritable_directory_is_fatal()
{
    let registrar = installed_registrar();
    let result = registrar.create_signal_scripts(
        Some(std::path::Path::new("/definitely/not/a/real/directory")),
        "",
        false,
    );
    assert!(result.is_err());
}
