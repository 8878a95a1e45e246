//! # CLI
//!
//! Command-line interface: `init` writes a default config file, `start`
//! boots the HTTP server.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, start};
pub use errors::{CliError, CliResult};
