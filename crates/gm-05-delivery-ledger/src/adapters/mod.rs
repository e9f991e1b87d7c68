//! # Adapters
//!
//! - `InMemoryDeliveryLedger`: map behind a single write lock
//! - `KvDeliveryLedger`: bincode records persisted through a `KeyValueStore`

pub mod kv;
pub mod memory;

pub use kv::KvDeliveryLedger;
pub use memory::InMemoryDeliveryLedger;
