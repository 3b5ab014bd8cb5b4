// SPDX-License-Identifier: MIT
//
// Wiring shared by the `nms` and `sneakers` binaries: logging setup, the
// terminal session around one run of the effect, and the mapping from
// outcomes to exit codes.

use std::io;
use std::process::ExitCode;

use nms_effect::{Effect, EffectError, Outcome};
use nms_term::signal::install_interrupt_handler;
use nms_term::{Capabilities, Terminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`warn` when unset).
const LOG_ENV: &str = "NMS_LOG";

/// Send `tracing` events to stderr, filtered by `NMS_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Run `effect` over `text` on stdout, reading keys from the terminal.
pub fn run_effect(mut effect: Effect, text: &str, caps: Capabilities) -> ExitCode {
    debug!(?caps, config = ?effect.config(), "starting effect");

    let mut term = match Terminal::new(caps) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cancel = install_interrupt_handler();

    if term.has_input() {
        term.clear_input();
    }

    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        effect.execute(text, &mut out, &mut term, &cancel)
    };

    if term.has_input() {
        term.clear_input();
    }

    report(result)
}

/// Print the user-facing message for `result` and pick the exit code.
fn report(result: Result<Outcome, EffectError>) -> ExitCode {
    match result {
        Ok(outcome) => {
            debug!(?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(EffectError::Interrupted) => {
            eprintln!("\nInterrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
