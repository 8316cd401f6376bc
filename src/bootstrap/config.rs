//! # Configuration loader
//!
//! Reads a TOML file and maps it to [`AppConfig`]. Defaults and validation
//! live in `AppConfig::from_toml`; this module only does I/O.

use std::path::{Path, PathBuf};

use anyhow::Context;
use jb_core::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config_dir>/jobboard/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobboard").join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// a value `AppConfig::from_toml` rejects.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(AppConfig::default()),
    }
}
