//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (clap, with `CF_*` environment fallbacks)
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing or malformed TOML file never stops startup: a warning is logged
//! and defaults are used.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

pub const APP_DIR_NAME: &str = "column-finder";
pub const DATABASE_FILE_NAME: &str = "column_finder.db";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UNIPROT_QUERY: &str = "reviewed:true AND organism_id:9606";
pub const DEFAULT_MAX_RESULTS: u32 = 450;

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[web]` section
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// `[ingest]` section
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// UniProt search query
    #[serde(default = "default_query")]
    pub query: String,
    /// Maximum number of records requested
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            max_results: default_max_results(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_query() -> String {
    DEFAULT_UNIPROT_QUERY.to_string()
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file, failing on I/O or syntax errors
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `explicit` if given, else the platform default location.
    ///
    /// Falls back to defaults (with a warning) instead of failing.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => return Self::default(),
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("Config file not found: {}, using defaults", path.display());
            }
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// CLI value wins over the config file, which wins over the default
    pub fn database_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(default_database_path)
    }
}

/// `<config dir>/column-finder/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<local data dir>/column-finder/column_finder.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./column_finder_data"))
        .join(DATABASE_FILE_NAME)
}
