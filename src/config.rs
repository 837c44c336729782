use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::export::DEFAULT_FILE_NAME;
use crate::utils::sanitize_filename;

pub const CONFIG_ENV_VAR: &str = "WPCUP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "wpcup.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for the importer window
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// File name suggested by the save dialog
    pub file_name: String,
    /// Reject start when the URL is not an http(s) address
    pub validate_url: bool,
    /// Keep the export comment well-formed when the URL contains `--`
    pub escape_url: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            validate_url: false,
            escape_url: false,
        }
    }
}

impl ImporterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.file_name = sanitize_filename(&config.file_name, DEFAULT_FILE_NAME);
        Ok(config)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Path from `WPCUP_CONFIG`, or `wpcup.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), ?config, "Loaded importer config");
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}
