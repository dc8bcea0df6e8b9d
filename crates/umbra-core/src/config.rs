//! Configuration loading and typed config structures for the Umbra reader.
//!
//! The canonical configuration lives in `umbra-config.yaml` next to the
//! binary. Every field has a default, so an empty file (or none at all) is a
//! valid configuration. Environment variables override the file:
//!
//! | Variable            | Field                  |
//! |---------------------|------------------------|
//! | `UMBRA_VIEWER`      | `viewer`               |
//! | `UMBRA_LEDGER_DUMP` | `sources.ledger_dump`  |
//! | `UMBRA_CHUNK_DUMP`  | `sources.chunk_dump`   |
//! | `UMBRA_LOG_LEVEL`   | `logging.level`        |

use std::path::{Path, PathBuf};

use serde::Deserialize;
use umbra_types::{Address, IdParseError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value {value:?} for {variable}: {source}")]
    Override {
        /// The environment variable.
        variable: &'static str,
        /// Its value.
        value: String,
        /// Why it was rejected.
        source: IdParseError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReaderConfig {
    /// Player whose explored chunks locate planets. Without a viewer every
    /// planet resolves unlocated.
    #[serde(default)]
    pub viewer: Option<Address>,

    /// Where ledger and chunk data come from.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReaderConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Override`] if an environment override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Override`] if an environment override is malformed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override fields with `UMBRA_*` environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if `UMBRA_VIEWER` is not an address.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|variable| std::env::var(variable).ok())
    }

    /// Override fields from any variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if the viewer is not an address.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("UMBRA_VIEWER") {
            let viewer = value.parse().map_err(|source| ConfigError::Override {
                variable: "UMBRA_VIEWER",
                value: value.clone(),
                source,
            })?;
            self.viewer = Some(viewer);
        }
        if let Some(value) = lookup("UMBRA_LEDGER_DUMP") {
            self.sources.ledger_dump = PathBuf::from(value);
        }
        if let Some(value) = lookup("UMBRA_CHUNK_DUMP") {
            self.sources.chunk_dump = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("UMBRA_LOG_LEVEL") {
            self.logging.level = value;
        }
        Ok(())
    }
}

/// Data source locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourcesConfig {
    /// JSON dump of ledger planets, arrivals, and constants.
    #[serde(default = "default_ledger_dump")]
    pub ledger_dump: PathBuf,

    /// JSON list of the viewer's explored chunks.
    #[serde(default)]
    pub chunk_dump: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            ledger_dump: default_ledger_dump(),
            chunk_dump: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per line instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_ledger_dump() -> PathBuf {
    PathBuf::from("ledger.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}
