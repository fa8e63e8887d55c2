// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads the TOML file (if any), applies `INGESTOR_*` environment overrides
//! and converts the raw tables into a validated runtime `Config`.

use crate::config::model::{Config, ConfigError, DatabaseConfig, DatabaseStub, FileConfig};
use crate::logging::parse_level;
use std::{fs, path::{Path, PathBuf}};

pub const ENV_CONFIG: &str = "INGESTOR_CONFIG";
pub const ENV_DB_PATH: &str = "INGESTOR_DB_PATH";
pub const ENV_BATCH_SIZE: &str = "INGESTOR_BATCH_SIZE";
pub const ENV_LOG_LEVEL: &str = "INGESTOR_LOG_LEVEL";

/// Upper bound for `generator.max_age`.
pub const MAX_AGE: u32 = 150;

/// Pick the config file: explicit argument, then `INGESTOR_CONFIG`, then `default.toml`.
pub fn config_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var(ENV_CONFIG).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("default.toml"))
}

/// Load the configuration from `path`, falling back to defaults when the
/// file does not exist, then apply process environment overrides.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = if path.exists() {
        log::debug!("Reading config from {:?}", path);
        let txt = fs::read_to_string(path)?;
        toml::from_str(&txt)?
    } else {
        FileConfig::default()
    };
    build(raw, |key| std::env::var(key).ok())
}

/// Parse a config from TOML text, with overrides looked up through `env`.
pub fn from_toml_str<F>(txt: &str, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    build(toml::from_str(txt)?, env)
}

fn build<F>(mut raw: FileConfig, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env(ENV_DB_PATH) {
        raw.database.path = path;
    }
    if let Some(size) = env(ENV_BATCH_SIZE) {
        raw.ingest.batch_size = size
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidOverride { key: ENV_BATCH_SIZE, value: size.clone() })?;
    }
    if let Some(level) = env(ENV_LOG_LEVEL) {
        raw.logging.level = level;
    }

    let cfg = Config {
        logging:   raw.logging,
        database:  convert_database(raw.database)?,
        ingest:    raw.ingest,
        generator: raw.generator,
    };
    validate(&cfg)?;
    Ok(cfg)
}

fn convert_database(stub: DatabaseStub) -> Result<DatabaseConfig, ConfigError> {
    let busy_timeout = humantime::parse_duration(&stub.busy_timeout)
        .map_err(|e| ConfigError::InvalidDuration(stub.busy_timeout.clone(), e))?;
    Ok(DatabaseConfig {
        path: PathBuf::from(stub.path),
        synchronous: stub.synchronous.parse()?,
        cache_size: stub.cache_size,
        busy_timeout,
        max_retries: stub.max_retries,
    })
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.ingest.batch_size == 0 {
        return Err(ConfigError::Invalid("ingest.batch_size must be greater than zero".into()));
    }
    if cfg.ingest.report_every == 0 {
        return Err(ConfigError::Invalid("ingest.report_every must be greater than zero".into()));
    }
    if cfg.generator.min_age > cfg.generator.max_age {
        return Err(ConfigError::Invalid(format!(
            "generator.min_age ({}) exceeds generator.max_age ({})",
            cfg.generator.min_age, cfg.generator.max_age
        )));
    }
    if cfg.generator.max_age > MAX_AGE {
        return Err(ConfigError::Invalid(format!(
            "generator.max_age ({}) exceeds {}",
            cfg.generator.max_age, MAX_AGE
        )));
    }
    if parse_level(&cfg.logging.level).is_none() {
        return Err(ConfigError::Invalid(format!("unknown logging.level '{}'", cfg.logging.level)));
    }
    Ok(())
}
