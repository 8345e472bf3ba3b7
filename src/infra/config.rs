//! On-disk session configuration: the reference grid and the parameters.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::SessionConfig;

const APP_QUALIFIER: &str = "be";
const APP_ORG: &str = "LaPrioriteImmobiliere";
const APP_NAME: &str = "ImmoEstimator";
const CONFIG_FILENAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

/// Default location, under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn read_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads the configuration, falling back to the built-in grid and parameters
/// when the file is missing or unreadable.
pub fn load_config(path: Option<&Path>) -> SessionConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        log::warn!("[config] No configuration directory; using defaults");
        return SessionConfig::default();
    };

    if !path.exists() {
        log::info!("[config] No configuration at {}; using defaults", path.display());
        return SessionConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            log::info!(
                "[config] Loaded {} grid rows from {}",
                config.grid.len(),
                path.display()
            );
            config
        }
        Err(err) => {
            log::warn!("[config] Failed to load {}: {err}; using defaults", path.display());
            SessionConfig::default()
        }
    }
}

/// Writes the configuration as pretty JSON and returns where it went.
pub fn save_config(config: &SessionConfig, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or(ConfigError::StorageUnavailable)?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)?;
    log::info!("[config] Saved configuration to {}", path.display());
    Ok(path)
}
