// src/ingest/mod.rs
//! Batch ingestion: accumulator, loop, progress reporting and stop flag.

pub mod accumulator;
pub mod interrupt;
pub mod pipeline;
pub mod reporter;

use thiserror::Error;

pub use accumulator::{fill_batch, Batch};
pub use interrupt::{spawn_ctrl_c_listener, Interrupt};
pub use pipeline::{Counters, Ingestor, LoopError, LoopState, RunSummary, Step, StopReason};
pub use reporter::{report, ReportLine};

use crate::config::Config;
use crate::db::{SqliteSession, StorageError};
use crate::generator::{FakeUserGenerator, GeneratorError};

/// Failures before the loop ever reaches `Running`.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Build the generator, open the database and run the loop until it stops.
pub fn run(cfg: &Config, interrupt: Interrupt) -> Result<RunSummary, SetupError> {
    let generator = FakeUserGenerator::new(&cfg.generator)?;
    let session = SqliteSession::open(&cfg.database)?;
    let mut ingestor = Ingestor::new(generator, session, &cfg.ingest, interrupt);
    Ok(ingestor.run())
}
