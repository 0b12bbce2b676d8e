//! Configuration loading for the Timeghost server.
//!
//! Settings live in `timeghost-config.yaml` at the project root. Every
//! field has a default, so a missing file or an empty section is fine.
//! Environment variables override the file:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `TIMEGHOST_HOST` | `server.host` |
//! | `TIMEGHOST_PORT` | `server.port` |
//! | `TIMEGHOST_CATALOG` | `catalog.path` |
//! | `TIMEGHOST_TEMPLATES` | `templates.dir` |
//!
//! `TIMEGHOST_CONFIG` selects the file itself.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use timeghost_core::NUM_TRIES;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "timeghost-config.yaml";

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

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidOverride {
        /// The environment variable.
        name: &'static str,
        /// Its raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration, mirroring `timeghost-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Listen address.
    #[serde(default)]
    pub server: ListenConfig,

    /// Event catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Page template location.
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Selector tuning.
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServerSettings {
    /// Load settings from `TIMEGHOST_CONFIG` (or [`DEFAULT_CONFIG_PATH`]),
    /// falling back to defaults when the file does not exist, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or an override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("TIMEGHOST_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Load settings from a YAML file, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `TIMEGHOST_PORT` is not a
    /// port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TIMEGHOST_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TIMEGHOST_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::InvalidOverride {
                name: "TIMEGHOST_PORT",
                value: port.clone(),
                reason: format!("{e}"),
            })?;
        }
        if let Some(path) = lookup("TIMEGHOST_CATALOG") {
            self.catalog.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("TIMEGHOST_TEMPLATES") {
            self.templates.dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

/// Listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Event catalog location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Path to the `description,date` CSV file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Page template location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding the page templates.
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

/// Selector tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Attempt budget per request.
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_tries: default_max_tries(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
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

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/events.csv")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

const fn default_max_tries() -> u32 {
    NUM_TRIES
}

fn default_log_level() -> String {
    String::from("info")
}
