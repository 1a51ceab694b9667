//! Configuration resolution for AGC services
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest, parsed by the service binary)
//! 2. Environment variable (also handled at the clap layer)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or malformed config file must not prevent startup: the
//! resolver logs a warning and falls through to defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default listen port for agc-api
pub const DEFAULT_PORT: u16 = 5730;

/// Compiled fallback values used when no override is present
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub port: u16,
    pub database: PathBuf,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let database = dirs::data_local_dir()
            .map(|d| d.join("agc").join("agc.db"))
            .unwrap_or_else(|| PathBuf::from("./agc.db"));

        Self {
            port: DEFAULT_PORT,
            database,
        }
    }
}

/// Schema of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
}

impl TomlConfig {
    /// Load from an explicit path, or the platform default location
    /// (`~/.config/agc/config.toml`) when none is given.
    ///
    /// Returns `TomlConfig::default()` when the file is absent or
    /// unparseable; startup never fails on config file problems.
    pub fn load(explicit_path: Option<&Path>) -> Self {
        let path = match explicit_path {
            Some(p) => p.to_path_buf(),
            None => match dirs::config_dir() {
                Some(d) => d.join("agc").join("config.toml"),
                None => return Self::default(),
            },
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                debug!("No config file at {} (using defaults)", path.display());
                return Self::default();
            }
        };

        match toml::from_str::<TomlConfig>(&content) {
            Ok(config) => {
                debug!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Ignoring malformed config file {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub database: PathBuf,
}

impl ServiceConfig {
    /// Resolve configuration from CLI overrides, the TOML file, and
    /// compiled defaults. CLI values already reflect environment
    /// variables (clap `env` feature), so priority here is
    /// CLI/env > TOML > default.
    pub fn resolve(
        cli_port: Option<u16>,
        cli_database: Option<PathBuf>,
        config_file: Option<&Path>,
    ) -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        let file = TomlConfig::load(config_file);

        Self {
            port: cli_port.or(file.port).unwrap_or(defaults.port),
            database: cli_database
                .or(file.database)
                .unwrap_or(defaults.database),
        }
    }
}
