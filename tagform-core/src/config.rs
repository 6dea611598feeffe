//! # Engine Configuration
//!
//! Limits and markers used by the engine. Every field has a default, so a TOML file only
//! needs the keys it wants to change:
//!
//! ```toml
//! text_max_length = 280
//! unfilled_marker = "[missing]"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid engine configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid engine configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest accepted tag name, in characters.
    pub max_name_length: usize,
    pub text_max_length: usize,
    pub multiline_max_length: usize,
    /// Stands in for unfilled tags in preview renders.
    pub preview_placeholder: String,
    /// Stands in for unfilled tags in safe renders.
    pub unfilled_marker: String,
    pub default_schema_title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_name_length: 50,
            text_max_length: 500,
            multiline_max_length: 2000,
            preview_placeholder: String::from("___"),
            unfilled_marker: String::from("[unfilled]"),
            default_schema_title: String::from("Template Parameters"),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<EngineConfig, ConfigError> {
        let config: EngineConfig = toml::from_str(input)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<EngineConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Rejects settings that would make the engine drop every tag or produce output that
    /// parses as a template again.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_name_length == 0 {
            return Err(ConfigError::Invalid(
                "max_name_length must be at least 1".to_string(),
            ));
        }
        for marker in [&self.preview_placeholder, &self.unfilled_marker] {
            if marker.contains("{{") || marker.contains("}}") {
                return Err(ConfigError::Invalid(format!(
                    "marker `{}` must not contain braces",
                    marker
                )));
            }
        }
        Ok(())
    }
}
