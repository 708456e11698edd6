//! plantdb CLI entry point
//!
//! Parses arguments, runs the selected command, and exits non-zero with the
//! error on stderr when it fails. All logic lives in the CLI module.

use plantdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
