//! The `taleforge` binary.

use std::env;
use std::process;
use std::sync::Arc;
use std::thread;

use clap::Parser;

use tf_core::{FaultReporter, TracingReporter, presentation_channel};
use tf_session::{SessionState, run_session};
use tf_store::DataDir;
use tf_tui::setup::{self, DATA_ENV};
use tf_tui::{App, terminal};

#[derive(Parser)]
#[command(
    name = "taleforge",
    about = "A small text adventure for the terminal",
    long_about = "A small text adventure for the terminal.\n\n\
                  Saves and settings live in ./data, or in the directory named by \
                  TALEFORGE_DATA. Set TALEFORGE_LOG to change the log filter.",
    version
)]
struct Args {}

fn main() {
    let _args = Args::parse();

    let root = setup::data_root(env::var_os(DATA_ENV));
    let data = match DataDir::open(&root) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: {}", tf_core::fault::error_chain(&e));
            process::exit(1);
        }
    };
    if let Err(e) = setup::init_logging(data.root()) {
        eprintln!("warning: {}", tf_core::fault::error_chain(&e));
    }

    let faults: Arc<dyn FaultReporter> = Arc::new(TracingReporter);
    let state = match SessionState::load(data) {
        Ok(state) => state,
        Err(e) => {
            faults.report(&e, "startup");
            eprintln!("error: {}", tf_core::fault::error_chain(&e));
            faults.terminate("configuration could not be loaded");
        }
    };
    tracing::info!(data = %root.display(), "starting");

    let (logic, presentation) = presentation_channel();
    let logic_faults = Arc::clone(&faults);
    let handle = match thread::Builder::new()
        .name("logic".to_string())
        .spawn(move || run_session(state, logic, logic_faults))
    {
        Ok(handle) => handle,
        Err(e) => {
            faults.report(&e, "startup");
            faults.terminate("logic thread could not be started");
        }
    };

    let ui = terminal::run(App::new(presentation));
    if let Err(e) = &ui {
        faults.report(e, "terminal");
        eprintln!("error: {}", tf_core::fault::error_chain(e));
    }

    match handle.join() {
        Ok(Ok(exit)) => {
            tracing::info!(?exit, "exiting");
            process::exit(if ui.is_ok() { 0 } else { 1 });
        }
        Ok(Err(e)) => {
            faults.report(&e, "session");
            eprintln!("error: {}", tf_core::fault::error_chain(&e));
            process::exit(1);
        }
        Err(_) => faults.terminate("logic thread panicked"),
    }
}
