//! tagvault CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. On failure the
//! error is printed to stderr and the process exits non-zero.

use tagvault::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
