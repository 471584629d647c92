//! Loading [`PickerConfig`] from YAML or JSON files.
//!
//! Missing keys take their defaults, unknown keys are rejected. The format
//! is chosen by file extension.

use shared::{CalendarDate, PickerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("min_date {min} is after max_date {max}")]
    InvalidRange { min: CalendarDate, max: CalendarDate },
}

/// Parse and validate a YAML config document
pub fn from_yaml_str(yaml: &str) -> Result<PickerConfig, ConfigError> {
    let config: PickerConfig = serde_yaml::from_str(yaml)?;
    validate(config)
}

/// Parse and validate a JSON config document
pub fn from_json_str(json: &str) -> Result<PickerConfig, ConfigError> {
    let config: PickerConfig = serde_json::from_str(json)?;
    validate(config)
}

/// Load a config file, `.yaml`/`.yml` or `.json`
pub fn load_config(path: impl AsRef<Path>) -> Result<PickerConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let content = || {
        fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let config = match extension.as_deref() {
        Some("yaml") | Some("yml") => from_yaml_str(&content()?)?,
        Some("json") => from_json_str(&content()?)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    info!("⚙️ Loaded picker config from {}", path.display());
    Ok(config)
}

fn validate(config: PickerConfig) -> Result<PickerConfig, ConfigError> {
    if let (Some(min), Some(max)) = (config.min_date, config.max_date) {
        if min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
    }
    if config.debounce_ms == 0 {
        warn!("⚙️ debounce_ms is 0, notifications fire on the next poll");
    }
    Ok(config)
}
