//! In-memory sequence ledger.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::EmitterKey;
use tracing::{debug, error, warn};

use crate::domain::SequenceError;
use crate::ports::SequenceLedgerApi;

/// Per-emitter atomic counters.
///
/// The map lock is only held to find or create a counter; increments run on
/// the counter itself, so distinct emitters proceed in parallel.
#[derive(Debug, Default)]
pub struct InMemorySequenceLedger {
    counters: RwLock<HashMap<EmitterKey, Arc<AtomicU64>>>,
}

impl InMemorySequenceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the last issued value for an emitter, e.g. when resuming from a
    /// snapshot. The next `next` returns `last_issued + 1`.
    ///
    /// The counter only moves forward: restoring below the last issued value
    /// fails with `SequenceError::Rewind` and leaves the counter unchanged.
    pub fn restore(&self, emitter: EmitterKey, last_issued: u64) -> Result<(), SequenceError> {
        let current = self
            .counter(&emitter)
            .fetch_max(last_issued, Ordering::SeqCst);
        if last_issued < current {
            warn!(
                "[gm-02] Refused to rewind {} from {} to {}",
                emitter, current, last_issued
            );
            return Err(SequenceError::Rewind {
                emitter,
                current,
                requested: last_issued,
            });
        }
        Ok(())
    }

    /// Number of emitters with a counter.
    pub fn emitter_count(&self) -> usize {
        self.counters.read().len()
    }

    fn counter(&self, emitter: &EmitterKey) -> Arc<AtomicU64> {
        if let Some(counter) = self.counters.read().get(emitter) {
            return Arc::clone(counter);
        }
        let mut counters = self.counters.write();
        Arc::clone(counters.entry(*emitter).or_default())
    }
}

impl SequenceLedgerApi for InMemorySequenceLedger {
    fn next(&self, emitter: &EmitterKey) -> Result<u64, SequenceError> {
        let counter = self.counter(emitter);
        match counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1)) {
            Ok(previous) => {
                let sequence = previous + 1;
                debug!("[gm-02] Issued sequence {} for {}", sequence, emitter);
                Ok(sequence)
            }
            Err(_) => {
                error!("[gm-02] Sequence overflow for {}", emitter);
                Err(SequenceError::Overflow { emitter: *emitter })
            }
        }
    }

    fn current(&self, emitter: &EmitterKey) -> Result<u64, SequenceError> {
        Ok(self
            .counters
            .read()
            .get(emitter)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0))
    }
}
