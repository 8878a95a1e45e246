//! Bookstack entry point
//!
//! A minimal entrypoint: parse CLI arguments, dispatch, print errors to
//! stderr and exit non-zero on failure. All logic lives in the cli module.

use bookstack::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
