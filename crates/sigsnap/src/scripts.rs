//! Convenience trigger scripts.
//!
//! One executable shell script per bound signal kind, so an operator
//! can trigger a snapshot without looking up the process id. Scripts
//! created here are removed again when the process exits normally.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use sigsnap_core::SnapshotResult;

use crate::registrar::Registrar;

/// Files queued for removal at normal process exit.
///
/// The exit hook is installed the first time the queue is touched, so
/// processes that never write a script never register one.
static CLEANUP_QUEUE: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| {
    unsafe {
        libc::atexit(remove_queued_scripts);
    }
    Mutex::new(Vec::new())
});

extern "C" fn remove_queued_scripts()
{
    if let Ok(queue) = CLEANUP_QUEUE.lock() {
        for path in queue.iter() {
            let _ = fs::remove_file(path);
        }
    }
}

fn queue_for_cleanup(path: PathBuf)
{
    if let Ok(mut queue) = CLEANUP_QUEUE.lock() {
        queue.push(path);
    }
}

impl Registrar
{
    /// Write one executable trigger script per bound kind into `dir`.
    ///
    /// Filenames are `<prefix>sigsnap-<KIND>`; each script runs
    /// `kill -s <KIND> <pid>` against this process. `dir` defaults to
    /// the home directory. Existing files are left alone unless
    /// `overwrite` is set. Every file written here is queued for
    /// removal at normal process exit.
    ///
    /// Returns the paths actually written.
    ///
    /// ## Errors
    ///
    /// File creation and permission errors propagate; an unwritable
    /// target directory has no fallback.
    pub fn create_signal_scripts(
        &self,
        dir: Option<&Path>,
        prefix: &str,
        overwrite: bool,
    ) -> SnapshotResult<Vec<PathBuf>>
    {
        let home;
        let dir = match dir {
            Some(dir) => dir,
            None => {
                home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
                home.as_path()
            }
        };

        let mut written = Vec::new();
        for kind in self.bound() {
            let path = dir.join(format!("{prefix}sigsnap-{}", kind.name()));
            if path.is_file() && !overwrite {
                continue;
            }

            fs::write(&path, format!("#!/bin/sh\nkill -s {} {}\n", kind.name(), self.pid()))?;
            let mut permissions = fs::metadata(&path)?.permissions();
            permissions.set_mode(permissions.mode() | 0o111);
            fs::set_permissions(&path, permissions)?;

            queue_for_cleanup(path.clone());
            tracing::info!(path = %path.display(), "trigger script created");
            written.push(path);
        }
        Ok(written)
    }
}
