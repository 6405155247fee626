//! sheetpipe CLI binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function.

use std::process::ExitCode;

use sheetpipe_cli::{init_logging, run_cli};

fn main() -> ExitCode {
    init_logging();

    // A closed stdout shows up as a BrokenPipe write error, not SIGPIPE
    match run_cli() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
