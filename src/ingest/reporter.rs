// src/ingest/reporter.rs

use std::{fmt, time::{Duration, Instant}};

/// Throughput snapshot derived from the loop's counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine {
    pub total:   u64,
    pub elapsed: Duration,
    /// Records per second; zero when no time has elapsed
    pub speed:   f64,
}

pub fn report(total_inserted: u64, started_at: Instant, now: Instant) -> ReportLine {
    let elapsed = now.saturating_duration_since(started_at);
    let secs = elapsed.as_secs_f64();
    let speed = if secs > 0.0 { total_inserted as f64 / secs } else { 0.0 };
    ReportLine { total: total_inserted, elapsed, speed }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inserted {} records in total. Speed: {:.0} records/sec ({:.1}s elapsed)",
            self.total,
            self.speed,
            self.elapsed.as_secs_f64()
        )
    }
}
