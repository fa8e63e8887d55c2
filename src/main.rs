// src/main.rs

//! Ingestor entry-point.
//!
//! 1. Load configuration & set up structured logging
//! 2. Start a Tokio runtime that turns Ctrl+C into a stop flag
//! 3. Run the ingestion loop on a blocking worker until it stops
//! 4. Exit non-zero if the loop stopped on an error

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use ingestor::config::{config_path, load};
use ingestor::ingest::{self, spawn_ctrl_c_listener, Interrupt, LoopState};
use ingestor::logging::setup_logging;

fn main() -> Result<()> {
    // 1 ─ Context
    let cfg_path = config_path(std::env::args().nth(1));
    let cfg = load(&cfg_path).with_context(|| format!("loading {}", cfg_path.display()))?;

    // 2 ─ Logging
    setup_logging(&cfg.logging).context("logging setup failed")?;
    log::info!("Ingestor bootstrap (config {})", cfg_path.display());

    // 3 ─ Runtime & interrupt
    let rt = Runtime::new().context("Tokio runtime creation failed")?;
    let interrupt = Interrupt::new();
    spawn_ctrl_c_listener(&rt, interrupt.clone());

    // 4 ─ Ingestion
    let worker = rt.spawn_blocking(move || ingest::run(&cfg, interrupt));
    let summary = match rt.block_on(worker).context("ingestion worker panicked")? {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Setup failed, ingestion never started: {}", e);
            return Err(e.into());
        }
    };

    log::info!(
        "Run finished: state={:?}, {} records in {:.1}s",
        summary.state,
        summary.total_inserted,
        summary.elapsed.as_secs_f64()
    );
    match (summary.state, summary.error) {
        (LoopState::StoppedByError, Some(e)) => Err(e).context("ingestion stopped by error"),
        _ => Ok(()),
    }
}
