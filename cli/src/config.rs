//! Optional YAML configuration for the `docschema` binary.
//!
//! # Example YAML
//!
//! ```yaml
//! format: yaml
//! pretty: true
//! strict: false
//! ```
//!
//! Every field is optional; command-line flags take precedence.

use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".docschema.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialization format of printed schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    /// Indent JSON output.
    pub pretty: bool,
    /// Fail `parse` when the built schema has validation errors.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            strict: false,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        // an empty file is a valid, all-default config
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Loads `path` when given, otherwise the default file if it exists.
    ///
    /// An explicitly named file must exist; a missing default file yields
    /// the default configuration.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
