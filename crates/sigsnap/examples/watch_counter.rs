//! Demo target for single-variable mode.
//!
//! Binds SIGUSR1 to a handler that reports only the `counter` local
//! from the interrupted frame:
//!
//! ```text
//! cargo run --example watch_counter
//! # elsewhere, repeatedly:
//! kill -s USR1 <pid>
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use sigsnap::{Registrar, SignalSelection, SingleVariable, ThreadScopes};

fn main()
{
    sigsnap_utils::init_logging().expect("Failed to initialize logging");

    let handler = Arc::new(SingleVariable::new());
    handler.set_variable("counter", "<no counter in scope>");

    let selection = SignalSelection { info: false, usr1: true, usr2: false };
    let _registrar = Registrar::install(selection, handler, Arc::new(ThreadScopes))
        .expect("Failed to install signal handlers");

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .expect("Failed to install ctrl-c handler");

    let scope = sigsnap::snapshot_scope!("main");
    let mut counter = 0u64;
    while running.load(Ordering::SeqCst) {
        counter += 1;
        scope.record("counter", counter);
        thread::sleep(Duration::from_millis(100));
    }
}
