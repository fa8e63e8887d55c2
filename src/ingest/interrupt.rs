// src/ingest/interrupt.rs
//! Cooperative stop flag, raised by Ctrl+C and polled between batches.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Raise `interrupt` on every Ctrl+C delivered to the process.
pub fn spawn_ctrl_c_listener(rt: &Runtime, interrupt: Interrupt) {
    rt.spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Cannot listen for Ctrl+C: {}", e);
                return;
            }
            if interrupt.is_raised() {
                log::warn!("Stop already requested, waiting for the current batch");
            } else {
                log::warn!("Stop requested (Ctrl+C), finishing the current batch");
                interrupt.raise();
            }
        }
    });
}
