// src/logging.rs
//! Structured console/file logging via `fern`.

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::{process, thread};

use crate::config::LoggingConfig;

/// Map a level name onto a `LevelFilter`; `None` for names `log` doesn't know.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_uppercase().as_str() {
        "OFF" => Some(LevelFilter::Off),
        "ERROR" => Some(LevelFilter::Error),
        "WARN" => Some(LevelFilter::Warn),
        "INFO" => Some(LevelFilter::Info),
        "DEBUG" => Some(LevelFilter::Debug),
        "TRACE" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Configure global logging as requested in `[logging]`.
pub fn setup_logging(cfg: &LoggingConfig) -> Result<(), fern::InitError> {
    let level = parse_level(&cfg.level).unwrap_or(LevelFilter::Info);
    let log_path = cfg
        .enable
        .then(|| cfg.file.clone().unwrap_or_else(|| "ingestor.log".into()));

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
