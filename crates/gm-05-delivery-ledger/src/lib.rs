//! # Delivery Ledger (GM-05)
//!
//! Exactly-once enforcement for inbound messages.
//!
//! **Subsystem ID:** 05
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! A record keyed by `(emitter_chain, emitter_address, sequence)` is written
//! once and never changed. Its presence is the replay guard: of any number of
//! concurrent `record_if_absent` calls for one key, exactly one observes
//! `Inserted`.
//!
//! ## Module Structure
//!
//! ```text
//! gm-05-delivery-ledger/
//! ├── domain/      # DeliveryRecord, RecordOutcome, key layout, errors
//! ├── ports/       # DeliveryLedgerApi
//! └── adapters/    # InMemoryDeliveryLedger, KvDeliveryLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryDeliveryLedger, KvDeliveryLedger};
pub use domain::{
    delivery_storage_key, DeliveryError, DeliveryRecord, RecordOutcome, DELIVERY_KEY_PREFIX,
};
pub use ports::DeliveryLedgerApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
