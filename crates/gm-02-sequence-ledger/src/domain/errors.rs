//! # Domain Errors

use shared_types::{EmitterKey, KVStoreError};
use thiserror::Error;

/// Sequence ledger failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// The counter for this emitter reached `u64::MAX`.
    #[error("Sequence overflow for emitter {emitter}")]
    Overflow {
        /// Emitter whose counter is exhausted
        emitter: EmitterKey,
    },

    /// A restore would move the counter below values already issued.
    #[error("Cannot rewind sequence for {emitter} from {current} to {requested}")]
    Rewind {
        /// Emitter whose counter was targeted
        emitter: EmitterKey,
        /// Last issued value
        current: u64,
        /// Value the caller asked to restore
        requested: u64,
    },

    /// A persisted counter did not hold 8 bytes.
    #[error("Corrupted sequence counter for {emitter}: {len} bytes")]
    Corrupted {
        /// Emitter whose record is damaged
        emitter: EmitterKey,
        /// Length of the stored value
        len: usize,
    },

    /// Backing store failed.
    #[error("Sequence storage error: {0}")]
    Storage(#[from] KVStoreError),
}
