//! Command-line and environment configuration for agc-api
//!
//! clap provides the CLI and environment tiers; file and default
//! tiers live in `agc_common::config`.

use agc_common::config::ServiceConfig;
use clap::Parser;
use std::path::PathBuf;

/// AI governance compliance API service
#[derive(Debug, Parser)]
#[command(name = "agc-api", version)]
pub struct Cli {
    /// Listen port
    #[arg(long, env = "AGC_API_PORT")]
    pub port: Option<u16>,

    /// SQLite database path
    #[arg(long, env = "AGC_API_DB")]
    pub database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, env = "AGC_API_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the full service configuration (CLI/env > TOML > default)
    pub fn resolve(&self) -> ServiceConfig {
        ServiceConfig::resolve(self.port, self.database.clone(), self.config.as_deref())
    }
}
