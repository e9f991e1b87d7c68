//! # Adapters
//!
//! - `InMemorySequenceLedger`: lock-free per-key counters
//! - `KvSequenceLedger`: counters persisted through a `KeyValueStore`

pub mod kv;
pub mod memory;

pub use kv::KvSequenceLedger;
pub use memory::InMemorySequenceLedger;
