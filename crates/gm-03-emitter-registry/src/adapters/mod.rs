//! # Adapters
//!
//! - `InMemoryEmitterRegistry`: `RwLock`-guarded map
//! - `KvEmitterRegistry`: records persisted through a `KeyValueStore`

pub mod kv;
pub mod memory;

pub use kv::KvEmitterRegistry;
pub use memory::InMemoryEmitterRegistry;
