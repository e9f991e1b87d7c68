//! # Inbound Ports
//!
//! API trait defining what the Sequence Ledger can do.

use shared_types::EmitterKey;

use crate::domain::SequenceError;

/// Sequence ledger API - inbound port.
pub trait SequenceLedgerApi: Send + Sync {
    /// Atomically increment and return the counter for `emitter`.
    ///
    /// The first call returns 1. No two calls for the same emitter ever
    /// return the same value.
    fn next(&self, emitter: &EmitterKey) -> Result<u64, SequenceError>;

    /// Last issued value, 0 when nothing has been issued.
    fn current(&self, emitter: &EmitterKey) -> Result<u64, SequenceError>;
}
