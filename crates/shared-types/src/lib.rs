//! # Shared Types Crate
//!
//! This crate contains the identifiers and ports shared by every messaging
//! subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Chain codes, universal addresses and the
//!   delivery key are defined once, here.
//! - **Canonical Addresses**: Every foreign address is carried as a 32-byte
//!   `UniversalAddress`; narrower native formats are left-padded with zeros
//!   and anything else is non-canonical.
//! - **Injected State**: Persistence goes through the `KeyValueStore` port;
//!   no subsystem owns ambient global state.

pub mod entities;
pub mod errors;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;
pub mod storage;
pub mod time;

pub use entities::*;
pub use errors::*;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbStore};
pub use storage::{BatchOperation, FileBackedKVStore, InMemoryKVStore, KeyValueStore};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
