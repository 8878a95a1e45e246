//! CLI command implementations
//!
//! `init` writes a default configuration file; `start` loads configuration
//! (falling back to defaults when the file is absent) and runs the server
//! on a tokio runtime until the process is stopped.

use std::fs;
use std::path::Path;

use crate::api::ApiServer;
use crate::config::Config;
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default configuration file, refusing to overwrite
pub fn init(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::AlreadyExists(format!(
            "config file already exists: {}",
            path.display()
        )));
    }

    let config = Config::default();
    let content = serde_json::to_string_pretty(&config)
        .map_err(crate::config::ConfigError::Parse)?;
    fs::write(path, content)?;

    Logger::info("cli.init", &[("config", &path.display().to_string())]);
    Ok(())
}

/// Load configuration and serve
pub fn start(path: &Path) -> CliResult<()> {
    let config = if path.exists() {
        Config::load(path)?
    } else {
        Logger::warn("cli.start", &[("config", "absent, using defaults")]);
        Config::default()
    };

    let server = ApiServer::new(config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}
