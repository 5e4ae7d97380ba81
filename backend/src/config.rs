//! Runtime configuration.
//!
//! Resolved in three layers, later ones winning:
//!
//! 1. built-in defaults (data in `~/Documents/Care Scheduler`)
//! 2. `config.yaml` inside the data directory, if present
//! 3. `CARE_SCHEDULER_DATA_DIR`, `CARE_SCHEDULER_BIND` and
//!    `CARE_SCHEDULER_CORS_ORIGIN` environment variables
//!
//! The data directory itself is picked from the environment variable or the
//! default before the YAML file is read. A `data_directory` entry in the YAML
//! file then redirects storage elsewhere.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATA_DIR_VAR: &str = "CARE_SCHEDULER_DATA_DIR";
pub const BIND_VAR: &str = "CARE_SCHEDULER_BIND";
pub const CORS_ORIGIN_VAR: &str = "CARE_SCHEDULER_CORS_ORIGIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: String,
    pub cors_origin: String,
    /// Install the default roster when no specialist exists
    pub seed_roster: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            seed_roster: true,
        }
    }
}

/// Optional overrides read from `config.yaml`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_directory: Option<PathBuf>,
    bind_address: Option<String>,
    cors_origin: Option<String>,
    seed_roster: Option<bool>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load configuration with `lookup` standing in for the environment
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_directory = PathBuf::from(dir);
        }

        let config_path = config.data_directory.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let file = read_config_file(&config_path)?;
            info!("Loaded configuration overrides from {}", config_path.display());
            config.apply(file);
        }

        if let Some(bind) = lookup(BIND_VAR) {
            config.bind_address = bind;
        }
        if let Some(origin) = lookup(CORS_ORIGIN_VAR) {
            config.cors_origin = origin;
        }

        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(dir) = file.data_directory {
            self.data_directory = dir;
        }
        if let Some(bind) = file.bind_address {
            self.bind_address = bind;
        }
        if let Some(origin) = file.cors_origin {
            self.cors_origin = origin;
        }
        if let Some(seed) = file.seed_roster {
            self.seed_roster = seed;
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
}

fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .map(|documents| documents.join("Care Scheduler"))
        .unwrap_or_else(|| PathBuf::from("care_scheduler_data"))
}
