//! Engine configuration loading for CLI commands

use crate::error::CliError;
use anyhow::{Context, Result};
use glossa_engine::EngineConfig;
use std::path::Path;

/// Environment variable naming the default configuration file
pub const CONFIG_ENV: &str = "GLOSSA_CONFIG";

/// Load the configuration at `path`, or the built-in defaults
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
            EngineConfig::from_file(path)
                .map_err(|e| CliError::ConfigError(e.to_string()))
                .with_context(|| format!("Failed to load configuration: {}", path.display()))
        }
        None => {
            log::info!("No configuration given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}
