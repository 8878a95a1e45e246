//! CLI argument definitions using clap
//!
//! Commands:
//! - bookstack init --config <path>
//! - bookstack start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bookstack - a book management REST API
#[derive(Parser, Debug)]
#[command(name = "bookstack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bookstack.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file; defaults apply if the file is absent
        #[arg(long, default_value = "./bookstack.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
