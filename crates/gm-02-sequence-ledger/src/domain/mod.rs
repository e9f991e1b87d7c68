//! # Domain Module
//!
//! Sequence ledger errors and persisted key layout.

pub mod errors;

pub use errors::SequenceError;

use shared_types::EmitterKey;

/// Value returned by the first `next` for an emitter.
pub const FIRST_SEQUENCE: u64 = 1;

/// Key namespace for persisted counters.
pub const SEQUENCE_KEY_PREFIX: &[u8] = b"sequence";

/// Persisted key: `b"sequence" || chain (u16 BE) || address (32)`.
pub fn sequence_storage_key(emitter: &EmitterKey) -> Vec<u8> {
    let mut key = Vec::with_capacity(SEQUENCE_KEY_PREFIX.len() + EmitterKey::ENCODED_LEN);
    key.extend_from_slice(SEQUENCE_KEY_PREFIX);
    key.extend_from_slice(&emitter.to_bytes());
    key
}
