// src/ingest/pipeline.rs

//! Ingestion loop: generate a batch, commit it, count it, repeat.
//!
//! The loop is an explicit state machine. `step` runs one batch and tells the
//! caller whether to continue; `run` drives it to a terminal state and
//! always closes the storage session on the way out.

use std::time::{Duration, Instant};
use thiserror::Error;

use super::accumulator::fill_batch;
use super::interrupt::Interrupt;
use super::reporter::{report, ReportLine};
use crate::config::IngestConfig;
use crate::db::{StorageError, StorageGateway};
use crate::generator::{GeneratorError, RecordGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Init,
    Running,
    StoppedBySignal,
    StoppedByError,
    /// `max_batches` reached
    Completed,
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopState::StoppedBySignal | LoopState::StoppedByError | LoopState::Completed)
    }
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("generator: {0}")]
    Generator(#[from] GeneratorError),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

/// Why the loop left `Running`.
#[derive(Debug)]
pub enum StopReason {
    Interrupted,
    Completed,
    Failed(LoopError),
    /// `step` was called before `start` or after a terminal state
    NotRunning(LoopState),
}

/// Outcome of one iteration.
#[derive(Debug)]
pub enum Step {
    Continue,
    Stop(StopReason),
}

/// Per-run counters, owned by the loop. Updated only after a confirmed commit.
#[derive(Debug, Clone, Copy)]
pub struct Counters {
    pub total_inserted: u64,
    pub batches:        u64,
    pub started_at:     Instant,
}

impl Counters {
    fn new() -> Self {
        Counters { total_inserted: 0, batches: 0, started_at: Instant::now() }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub state:          LoopState,
    pub total_inserted: u64,
    pub batches:        u64,
    pub reports:        u64,
    pub elapsed:        Duration,
    pub error:          Option<LoopError>,
    pub close_error:    Option<StorageError>,
}

pub struct Ingestor<G, S> {
    generator:    G,
    storage:      S,
    batch_size:   usize,
    report_every: u64,
    max_batches:  Option<u64>,
    interrupt:    Interrupt,
    state:        LoopState,
    counters:     Counters,
    reports:      u64,
    last_report:  Option<ReportLine>,
}

impl<G, S> Ingestor<G, S>
where
    G: RecordGenerator,
    S: StorageGateway,
{
    pub fn new(generator: G, storage: S, cfg: &IngestConfig, interrupt: Interrupt) -> Self {
        Ingestor {
            generator,
            storage,
            batch_size: cfg.batch_size,
            report_every: cfg.report_every.max(1),
            max_batches: cfg.max_batches,
            interrupt,
            state: LoopState::Init,
            counters: Counters::new(),
            reports: 0,
            last_report: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Number of progress lines emitted so far.
    pub fn reports(&self) -> u64 {
        self.reports
    }

    pub fn last_report(&self) -> Option<&ReportLine> {
        self.last_report.as_ref()
    }

    /// `Init -> Running`: reset counters and stamp the start time.
    pub fn start(&mut self) {
        if self.state != LoopState::Init {
            return;
        }
        self.counters = Counters::new();
        self.state = LoopState::Running;
        log::info!("Starting ingestion in batches of {} records", self.batch_size);
    }

    /// Run one batch. The interrupt flag and the batch limit are only
    /// consulted here, between transactions.
    pub fn step(&mut self) -> Step {
        if self.state != LoopState::Running {
            log::warn!("step() called in state {:?}", self.state);
            return Step::Stop(StopReason::NotRunning(self.state));
        }
        if self.interrupt.is_raised() {
            return Step::Stop(StopReason::Interrupted);
        }
        if self.max_batches.is_some_and(|max| self.counters.batches >= max) {
            return Step::Stop(StopReason::Completed);
        }

        let batch = match fill_batch(&mut self.generator, self.batch_size) {
            Ok(batch) => batch,
            Err(e) => return Step::Stop(StopReason::Failed(e.into())),
        };
        log::trace!("Generated {} records", batch.len());
        let inserted = match self.storage.insert_batch(batch.records()) {
            Ok(n) => n as u64,
            Err(e) => return Step::Stop(StopReason::Failed(e.into())),
        };
        drop(batch);

        self.counters.total_inserted += inserted;
        self.counters.batches += 1;
        metrics::counter!("ingest_rows_total").increment(inserted);
        metrics::counter!("ingest_batches_total").increment(1);
        log::debug!("Committed batch #{} ({} rows)", self.counters.batches, inserted);

        if self.counters.batches % self.report_every == 0 {
            let line = report(self.counters.total_inserted, self.counters.started_at, Instant::now());
            log::info!("{}", line);
            self.reports += 1;
            self.last_report = Some(line);
        }
        Step::Continue
    }

    /// Drive the loop to a terminal state and close the session.
    pub fn run(&mut self) -> RunSummary {
        self.start();
        let reason = if self.state == LoopState::Running {
            loop {
                if let Step::Stop(reason) = self.step() {
                    break reason;
                }
            }
        } else {
            log::warn!("Ingestion already finished ({:?})", self.state);
            StopReason::NotRunning(self.state)
        };
        self.finish(reason)
    }

    fn finish(&mut self, reason: StopReason) -> RunSummary {
        let mut error = None;
        if !self.state.is_terminal() {
            self.state = match reason {
                StopReason::Interrupted => {
                    log::warn!("Ingestion stopped by user interrupt");
                    LoopState::StoppedBySignal
                }
                StopReason::Completed => {
                    log::info!("Ingestion completed after {} batches", self.counters.batches);
                    LoopState::Completed
                }
                StopReason::Failed(e) => {
                    log::error!("Ingestion stopped by error: {}", e);
                    error = Some(e);
                    LoopState::StoppedByError
                }
                StopReason::NotRunning(state) => state,
            };
        }

        let close_error = self.storage.close().err();
        if let Some(e) = &close_error {
            log::error!("Closing the database session failed: {}", e);
        }
        log::info!(
            "Inserted {} records in {} batches this run",
            self.counters.total_inserted,
            self.counters.batches
        );

        RunSummary {
            state: self.state,
            total_inserted: self.counters.total_inserted,
            batches: self.counters.batches,
            reports: self.reports,
            elapsed: self.counters.started_at.elapsed(),
            error,
            close_error,
        }
    }
}
