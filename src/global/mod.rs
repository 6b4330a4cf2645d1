use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "subpro";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Unable to determine config directory")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory artifacts are written to when neither the CLI nor the config names one.
pub fn default_output_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Unable to determine current directory")
}
