//! Demo target for interactive mode.
//!
//! Sending SIGUSR1 dumps the stack and then drops into the line
//! inspector; the loop stays suspended until you `quit`:
//!
//! ```text
//! cargo run --example inspect_session
//! # elsewhere:
//! kill -s USR1 <pid>
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sigsnap::{InteractiveDebug, Registrar, SignalSelection, ThreadScopes};

fn main()
{
    sigsnap_utils::init_logging().expect("Failed to initialize logging");

    let selection = SignalSelection { info: false, usr1: true, usr2: false };
    let _registrar = Registrar::install(selection, Arc::new(InteractiveDebug::new()), Arc::new(ThreadScopes))
        .expect("Failed to install signal handlers");

    let scope = sigsnap::snapshot_scope!("main");
    let mut phase = 0u64;
    loop {
        phase = (phase + 1) % 4;
        scope.record("phase", phase);
        scope.record("label", phase_label(phase));
        simmer(phase);
    }
}

fn simmer(phase: u64)
{
    let scope = sigsnap::snapshot_scope!("simmer");
    scope.record("phase", phase);
    thread::sleep(Duration::from_millis(250));
}

fn phase_label(phase: u64) -> &'static str
{
    match phase {
        0 => "idle",
        1 => "warmup",
        2 => "busy",
        _ => "cooldown",
    }
}
