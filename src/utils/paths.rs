//! Path Utilities
//!
//! Resolves the default configuration file location.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// File name of the configuration file in the home directory
pub const CONFIG_FILE_NAME: &str = ".payslip4u-downloader.json";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the default config file path (~/.payslip4u-downloader.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(CONFIG_FILE_NAME))
}

/// Resolve an explicit config path, falling back to the default location
pub fn resolve_config_path(explicit: Option<&Path>) -> AppResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}
