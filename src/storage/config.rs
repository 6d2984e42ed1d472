//! JSON Configuration Loading
//!
//! Reads and validates the portal configuration file. All failures surface
//! as `AppError::Config` so the caller can abort before launching a browser.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::config::PortalConfig;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::resolve_config_path;

/// Configuration service holding the validated portal config
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: PortalConfig,
}

impl ConfigService {
    /// Load from `explicit`, or from `~/.payslip4u-downloader.json` when `None`
    pub fn new(explicit: Option<&Path>) -> AppResult<Self> {
        let config_path = resolve_config_path(explicit)?;
        let config = Self::load_from_file(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load and validate configuration from a file
    pub fn load_from_file(path: &Path) -> AppResult<PortalConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("{} could not be loaded - {}", path.display(), e))
        })?;
        let config: PortalConfig = serde_json::from_str(&content).map_err(|e| {
            AppError::config(format!("{} could not be loaded - {}", path.display(), e))
        })?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &PortalConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> PortalConfig {
        self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
