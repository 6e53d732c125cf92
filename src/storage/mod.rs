//! Storage paths
//!
//! Resolves where the configuration file lives on this platform.

use anyhow::Result;
use std::path::PathBuf;

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "word4word", "Word4Word")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}
