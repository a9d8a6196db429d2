//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config file name, relative to the working directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Command lines run through the dispatcher before interactive input
    #[serde(default)]
    pub startup_code: Vec<String>,
}

impl Config {
    /// Load config from an explicit path, or from `config.json` in the
    /// working directory when present, or fall back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_from(&local);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            startup_lines = config.startup_code.len(),
            "loaded config"
        );
        Ok(config)
    }
}
