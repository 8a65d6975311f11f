//! Subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use stmtx_core::StmtxConfig;
use tracing::debug;

/// Default location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stmtx")
        .join("config.json")
}

/// Load the configuration named on the command line, else the user file if
/// one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StmtxConfig> {
    if let Some(path) = config_path {
        return Ok(StmtxConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        return Ok(StmtxConfig::from_file(&default_path)?);
    }

    Ok(StmtxConfig::default())
}
