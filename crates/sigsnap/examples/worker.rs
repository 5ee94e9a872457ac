//! Demo target: an instrumented busy loop with full stack dumps.
//!
//! Run it, note the printed kill commands, then send one of them from
//! another terminal:
//!
//! ```text
//! cargo run --example worker
//! # elsewhere:
//! kill -s USR1 <pid>
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use sigsnap::{FullDump, Registrar, SignalSelection, SnapshotHandler, ThreadScopes};

/// Instrumented busy loop; signal it for a stack dump.
#[derive(Parser, Debug)]
#[command(name = "worker")]
struct Cli
{
    /// Also bind SIGUSR2
    #[arg(long, default_value_t = false)]
    usr2: bool,
    /// Maximum stack levels to render (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    depth: usize,
    /// Write trigger scripts into the current directory
    #[arg(long, default_value_t = false)]
    scripts: bool,
}

fn main()
{
    sigsnap_utils::init_logging().expect("Failed to initialize logging");
    let cli = Cli::parse();

    let handler = Arc::new(FullDump::new());
    handler.options().set_max_levels(cli.depth);

    let selection = SignalSelection { usr2: cli.usr2, ..SignalSelection::default() };
    let registrar = Registrar::install(selection, handler, Arc::new(ThreadScopes))
        .expect("Failed to install signal handlers");

    if cli.scripts {
        let written = registrar
            .create_signal_scripts(Some(std::path::Path::new(".")), "", false)
            .expect("Failed to write trigger scripts");
        for path in written {
            println!("trigger script: {}", path.display());
        }
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .expect("Failed to install ctrl-c handler");

    let scope = sigsnap::snapshot_scope!("main");
    let mut iteration = 0u64;
    let mut sum = 0i64;
    while running.load(Ordering::SeqCst) {
        iteration += 1;
        scope.record("iteration", iteration);
        scope.record("sum", sum);
        scope.set_line(line!());

        sum = add_to_sum(iteration, sum);
        thread::sleep(Duration::from_millis(200));
    }
}

fn add_to_sum(value: u64, current_sum: i64) -> i64
{
    let scope = sigsnap::snapshot_scope!("add_to_sum");
    scope.record("value", value);
    scope.record("current_sum", current_sum);

    let result = if value % 2 == 0 {
        current_sum + i64::try_from(value).unwrap_or(i64::MAX)
    } else {
        current_sum - i64::try_from(value).unwrap_or(i64::MAX)
    };
    result.clamp(-1000, 1000)
}
