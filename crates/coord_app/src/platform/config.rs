use std::fs;
use std::path::Path;
use std::time::Duration;

use coord_core::{PipelineSettings, DEFAULT_PARAM};
use coord_engine::{ClientSettings, DEFAULT_CONVERT_PATH};
use coord_logging::{coord_info, coord_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overrides `convert_path` when set.
pub const CONVERT_PATH_ENV: &str = "COORD_CONVERT_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
}

/// Front-end settings, stored as RON. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub convert_path: String,
    pub query_param: String,
    pub url_debounce_ms: u64,
    pub conversion_debounce_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            convert_path: DEFAULT_CONVERT_PATH.to_string(),
            query_param: DEFAULT_PARAM.to_string(),
            url_debounce_ms: 300,
            conversion_debounce_ms: 350,
            request_timeout_ms: 15_000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_ron(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: display,
            message: err.to_string(),
        })
    }

    /// Loads `path`, falling back to defaults when it is missing or broken,
    /// then applies the environment override.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let mut config = match path {
            None => Self::default(),
            Some(path) if !path.exists() => {
                coord_info!("No config at {:?}; using defaults", path);
                Self::default()
            }
            Some(path) => match Self::from_ron(path) {
                Ok(config) => {
                    coord_info!("Loaded config from {:?}", path);
                    config
                }
                Err(err) => {
                    coord_warn!("{}; using defaults", err);
                    Self::default()
                }
            },
        };
        config.apply_env_override(std::env::var(CONVERT_PATH_ENV).ok());
        config
    }

    pub fn apply_env_override(&mut self, convert_path: Option<String>) {
        if let Some(convert_path) = convert_path.filter(|value| !value.trim().is_empty()) {
            coord_info!("{} overrides convert path: {}", CONVERT_PATH_ENV, convert_path);
            self.convert_path = convert_path;
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            param: self.query_param.clone(),
            url_debounce: Duration::from_millis(self.url_debounce_ms),
            conversion_debounce: Duration::from_millis(self.conversion_debounce_ms),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            convert_path: self.convert_path.clone(),
            query_param: self.query_param.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_body_bytes,
            ..ClientSettings::default()
        }
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
    }
}
