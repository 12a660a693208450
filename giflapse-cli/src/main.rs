// giflapse-cli/src/main.rs
//
// Entry point for the `giflapse` binary.
//
// Responsibilities:
// - Parsing arguments (help/version exit 0, any other argument error exits 1).
// - Initializing logging.
// - Running the conversion and mapping its outcome to the exit code.

use clap::Parser;
use clap::error::ErrorKind;
use giflapse_cli::{Cli, FAILURE_EXIT_CODE, logging, print_error, run_convert};
use std::process;

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => FAILURE_EXIT_CODE,
            };
            // print() routes help/version to stdout and errors to stderr.
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init_logging();

    if let Err(e) = run_convert(&args) {
        log::debug!("Conversion failed: {e:?}");
        print_error(&e);
        process::exit(FAILURE_EXIT_CODE);
    }
}
