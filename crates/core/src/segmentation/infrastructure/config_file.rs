use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::segmentation::domain::segment_config::{InvalidConfigValue, SegmentConfig};
use crate::shared::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("could not determine config directory")]
    NoConfigDir,
}

impl From<InvalidConfigValue> for ConfigError {
    fn from(e: InvalidConfigValue) -> Self {
        Self::InvalidValue {
            key: e.key.to_string(),
            message: e.message,
        }
    }
}

/// `<config_dir>/phrase-segmenter/config.json`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Loads and validates a JSON config. Keys not present keep their defaults.
pub fn load_config(path: &Path) -> Result<SegmentConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: SegmentConfig = serde_json::from_str(&data).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    log::debug!("loaded segmentation config from {}", path.display());
    Ok(config)
}

/// Loads `path` when given; otherwise the default config file if it
/// exists, falling back to built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<SegmentConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }
    match default_config_path() {
        Ok(default_path) if default_path.exists() => load_config(&default_path),
        _ => Ok(SegmentConfig::default()),
    }
}

/// Writes `config` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &SegmentConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
