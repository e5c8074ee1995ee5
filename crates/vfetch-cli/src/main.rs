use vfetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Fall back to stderr when the state dir is not writable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("vfetch error: {:#}", err);
        std::process::exit(1);
    }
}
