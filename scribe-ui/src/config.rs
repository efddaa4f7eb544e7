use crate::doc::SerializeOptions;
use crate::error::RenderError;
use crate::factory::ElementFactory;
use crate::host::HostOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Level that disables logging entirely.
pub const LOG_OFF: &str = "off";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid tag in config: {0}")]
    Tag(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    pub log_level: String,
    pub output: SerializeOptions,
    pub host: HostOptions,
    /// Extra element tags on top of the built-in table.
    pub tags: Vec<String>,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output: SerializeOptions::default(),
            host: HostOptions::default(),
            tags: Vec::new(),
        }
    }
}

impl ScribeConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.factory()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Factory with the configured custom tags registered.
    pub fn factory(&self) -> Result<ElementFactory, ConfigError> {
        Ok(ElementFactory::with_tags(&self.tags)?)
    }

    pub fn logging_enabled(&self) -> bool {
        !self.log_level.eq_ignore_ascii_case(LOG_OFF)
    }
}
