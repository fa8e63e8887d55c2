// src/config/model.rs

use serde::Deserialize;
use std::{path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

/// Top-level runtime config
#[derive(Debug, Clone)]
pub struct Config {
    pub logging:   LoggingConfig,
    pub database:  DatabaseConfig,
    pub ingest:    IngestConfig,
    pub generator: GeneratorConfig,
}

/// Mirror of the `[logging]` table
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]            pub enable: bool,
    #[serde(default)]            pub file:   Option<String>,
    #[serde(default = "default_level")] pub level: String,
}
fn default_level() -> String { "INFO".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { enable: false, file: None, level: default_level() }
    }
}

/// Raw `[database]` table as written in TOML
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseStub {
    pub path:         String,
    pub synchronous:  String,
    pub cache_size:   i64,
    pub busy_timeout: String,
    pub max_retries:  u32,
}

impl Default for DatabaseStub {
    fn default() -> Self {
        DatabaseStub {
            path:         "data.db".into(),
            synchronous:  "NORMAL".into(),
            cache_size:   10_000_000,
            busy_timeout: "1s".into(),
            max_retries:  0,
        }
    }
}

/// Fully-typed storage settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path:         PathBuf,
    pub synchronous:  Synchronous,
    pub cache_size:   i64,
    pub busy_timeout: Duration,
    /// Extra attempts for a batch that hit BUSY/LOCKED. Zero disables retry.
    pub max_retries:  u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path:         PathBuf::from("data.db"),
            synchronous:  Synchronous::Normal,
            cache_size:   10_000_000,
            busy_timeout: Duration::from_secs(1),
            max_retries:  0,
        }
    }
}

/// Mirror of the `[ingest]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub batch_size:   usize,
    /// Committed batches between two progress lines
    pub report_every: u64,
    /// Stop normally after this many batches; unbounded when absent
    pub max_batches:  Option<u64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig { batch_size: 100_000, report_every: 10, max_batches: None }
    }
}

/// Mirror of the `[generator]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub locale:  String,
    pub seed:    Option<u64>,
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig { locale: "en_US".into(), seed: None, min_age: 18, max_age: 80 }
    }
}

/// Whole file as deserialized from TOML; every table is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub logging:   LoggingConfig,
    pub database:  DatabaseStub,
    pub ingest:    IngestConfig,
    pub generator: GeneratorConfig,
}

/// SQLite `synchronous` pragma values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synchronous {
    Off,
    Normal,
    Full,
    Extra,
}

impl Synchronous {
    pub fn as_str(&self) -> &'static str {
        match self {
            Synchronous::Off    => "OFF",
            Synchronous::Normal => "NORMAL",
            Synchronous::Full   => "FULL",
            Synchronous::Extra  => "EXTRA",
        }
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid synchronous mode '{0}'")]
    InvalidSynchronous(String),

    #[error("invalid duration '{0}': {1}")]
    InvalidDuration(String, #[source] humantime::DurationError),

    #[error("invalid value '{value}' for {key}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Allow `"normal"` → `Synchronous::Normal`
impl FromStr for Synchronous {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off"    => Ok(Synchronous::Off),
            "normal" => Ok(Synchronous::Normal),
            "full"   => Ok(Synchronous::Full),
            "extra"  => Ok(Synchronous::Extra),
            other    => Err(ConfigError::InvalidSynchronous(other.into())),
        }
    }
}
