//! # Sequence Ledger (GM-02)
//!
//! Issues strictly increasing sequence numbers per emitter.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Guarantees
//!
//! | Property | Description |
//! |----------|-------------|
//! | Start | The first `next` for an emitter returns 1 |
//! | Linearizable | Concurrent `next` calls on one emitter never repeat or skip |
//! | Independent | Different emitters never contend on the same counter |
//! | Overflow | Exhausting `u64` is a fatal `SequenceError::Overflow` |
//! | Forward-only | `restore` never moves a counter below an issued value |
//!
//! ## Module Structure
//!
//! ```text
//! gm-02-sequence-ledger/
//! ├── domain/      # SequenceError, storage key layout
//! ├── ports/       # SequenceLedgerApi
//! └── adapters/    # InMemorySequenceLedger, KvSequenceLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemorySequenceLedger, KvSequenceLedger};
pub use domain::{sequence_storage_key, SequenceError, FIRST_SEQUENCE, SEQUENCE_KEY_PREFIX};
pub use ports::SequenceLedgerApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
