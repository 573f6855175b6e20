use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::source::EndpointKind;

/// Backend used when neither the environment nor the config file names one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the configured backend base.
pub const BACKEND_URL_ENV: &str = "WIND_BACKEND_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// backend_url = "http://forecast.lan:5000"
/// endpoint = "hourly"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Backend base URL, e.g. "http://localhost:5000".
    pub backend_url: Option<String>,

    /// Hourly endpoint id: "hourly" or "proxied".
    pub endpoint: Option<String>,

    /// Slider position remembered between runs.
    pub selected_hour: Option<usize>,
}

impl Config {
    /// Effective backend base: the configured value or the local default.
    pub fn backend_base(&self) -> String {
        self.backend_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    /// Configured endpoint as a strongly-typed kind, `hourly` when unset.
    pub fn endpoint_kind(&self) -> Result<EndpointKind> {
        match self.endpoint.as_deref() {
            Some(s) => EndpointKind::try_from(s),
            None => Ok(EndpointKind::Hourly),
        }
    }

    pub fn set_endpoint(&mut self, kind: EndpointKind) {
        self.endpoint = Some(kind.as_str().to_string());
    }

    /// Replace the backend base if `value` is a non-blank override.
    pub fn apply_backend_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.backend_url = Some(url);
        }
    }

    /// Load config from disk, then apply the `WIND_BACKEND_URL` override.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_backend_override(std::env::var(BACKEND_URL_ENV).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Persist the slider position without touching any other stored setting.
    pub fn store_selected_hour(hour: usize) -> Result<()> {
        let path = Self::config_file_path()?;
        let mut stored = Self::load_from(&path)?;
        stored.selected_hour = Some(hour);
        stored.save_to(&path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wind-forecaster", "wind-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
