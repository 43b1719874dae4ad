//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "KNITGRAPH_CONFIG";

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("knitgraph")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default swatch width in stitches
    pub width: usize,
    /// Default swatch height in rows
    pub height: usize,
    /// Default rib band width
    pub rib_width: usize,
    /// Default output format
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            rib_width: 1,
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Known config keys
    pub fn keys() -> &'static [&'static str] {
        &["width", "height", "rib_width", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "width" => Some(self.width.to_string()),
            "height" => Some(self.height.to_string()),
            "rib_width" => Some(self.rib_width.to_string()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "width" => self.width = parse_positive(key, value)?,
            "height" => self.height = parse_positive(key, value)?,
            "rib_width" => self.rib_width = parse_positive(key, value)?,
            "format" => {
                let format: OutputFormat = value.parse()?;
                self.format = format.as_str().to_string();
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> anyhow::Result<usize> {
    let parsed: usize = value
        .parse()
        .with_context(|| format!("{} must be a positive integer, got '{}'", key, value))?;
    if parsed == 0 {
        anyhow::bail!("{} must be at least 1", key);
    }
    Ok(parsed)
}
