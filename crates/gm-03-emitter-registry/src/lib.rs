//! # Emitter Registry (GM-03)
//!
//! Trust records mapping each foreign chain to the one emitter address
//! allowed to source inbound messages from it.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Owner only | `register` requires the configured owner credential |
//! | One per chain | Registering a chain again overwrites (last write wins) |
//! | Valid emitter | Chain 0, the local chain and the zero address are refused |
//! | Atomic swap | A lookup sees the full old or the full new record |
//!
//! ## Module Structure
//!
//! ```text
//! gm-03-emitter-registry/
//! ├── domain/      # OwnerCredential, ForeignEmitter, invariants, errors
//! ├── ports/       # EmitterRegistryApi
//! └── adapters/    # InMemoryEmitterRegistry, KvEmitterRegistry
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryEmitterRegistry, KvEmitterRegistry};
pub use domain::{
    invariant_valid_foreign_emitter, registry_storage_key, ForeignEmitter, InvalidEmitterReason,
    OwnerCredential, RegistryError, REGISTRY_KEY_PREFIX,
};
pub use ports::EmitterRegistryApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
