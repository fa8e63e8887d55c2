// src/ingest/accumulator.rs
//! Fixed-size batches pulled from a generator.

use crate::generator::{GeneratorError, Record, RecordGenerator};

/// Records held in memory between generation and commit. Dropped after the
/// commit so at most one batch is alive at a time.
#[derive(Debug, Default)]
pub struct Batch {
    records: Vec<Record>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Call the generator exactly `size` times, keeping call order. The first
/// generator error aborts the whole batch; no partial batch is returned.
pub fn fill_batch<G>(generator: &mut G, size: usize) -> Result<Batch, GeneratorError>
where
    G: RecordGenerator + ?Sized,
{
    let mut records = Vec::with_capacity(size);
    for _ in 0..size {
        records.push(generator.generate()?);
    }
    Ok(Batch { records })
}
