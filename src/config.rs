//! # Configuration
//!
//! Server, cache and rate-limit settings, loaded from a JSON file. Every
//! field has a default so a missing or sparse file still yields a working
//! development configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::DEFAULT_TTL_SECS;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Response cache entry time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// List and get-by-id requests allowed per minute
    #[serde(default = "default_reads_per_minute")]
    pub reads_per_minute: usize,

    /// Create/update/delete requests allowed per minute
    #[serde(default = "default_writes_per_minute")]
    pub writes_per_minute: usize,

    /// Bulk requests allowed per minute
    #[serde(default = "default_bulk_per_minute")]
    pub bulk_per_minute: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_reads_per_minute() -> usize {
    100
}

fn default_writes_per_minute() -> usize {
    20
}

fn default_bulk_per_minute() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
            reads_per_minute: default_reads_per_minute(),
            writes_per_minute: default_writes_per_minute(),
            bulk_per_minute: default_bulk_per_minute(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Bind address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
