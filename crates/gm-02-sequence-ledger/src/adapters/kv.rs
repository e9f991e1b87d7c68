//! Sequence ledger persisted through a `KeyValueStore`.

use parking_lot::Mutex;
use shared_types::{EmitterKey, KeyValueStore};
use tracing::{debug, error};

use crate::domain::{sequence_storage_key, SequenceError};
use crate::ports::SequenceLedgerApi;

/// Durable counters.
///
/// Read-increment-write runs under a single store mutex, which makes every
/// `next` linearizable. The value is the last issued sequence as `u64` BE.
pub struct KvSequenceLedger<S: KeyValueStore> {
    store: Mutex<S>,
}

impl<S: KeyValueStore> KvSequenceLedger<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Release the underlying store.
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }

    fn read_counter(store: &S, emitter: &EmitterKey) -> Result<u64, SequenceError> {
        match store.get(&sequence_storage_key(emitter))? {
            None => Ok(0),
            Some(bytes) => {
                let raw: [u8; 8] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| SequenceError::Corrupted {
                            emitter: *emitter,
                            len: bytes.len(),
                        })?;
                Ok(u64::from_be_bytes(raw))
            }
        }
    }
}

impl<S: KeyValueStore> SequenceLedgerApi for KvSequenceLedger<S> {
    fn next(&self, emitter: &EmitterKey) -> Result<u64, SequenceError> {
        let mut store = self.store.lock();
        let current = Self::read_counter(&store, emitter)?;
        let sequence = current.checked_add(1).ok_or_else(|| {
            error!("[gm-02] Sequence overflow for {}", emitter);
            SequenceError::Overflow { emitter: *emitter }
        })?;

        store
            .put(&sequence_storage_key(emitter), &sequence.to_be_bytes())
            .map_err(|e| {
                error!("[gm-02] Failed to persist sequence for {}: {}", emitter, e);
                SequenceError::from(e)
            })?;

        debug!("[gm-02] Issued sequence {} for {}", sequence, emitter);
        Ok(sequence)
    }

    fn current(&self, emitter: &EmitterKey) -> Result<u64, SequenceError> {
        let store = self.store.lock();
        Self::read_counter(&store, emitter)
    }
}
