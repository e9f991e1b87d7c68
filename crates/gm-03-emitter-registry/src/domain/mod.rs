//! # Domain Module
//!
//! Registration records, owner credential and validation rules.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::{registry_storage_key, ForeignEmitter, OwnerCredential, REGISTRY_KEY_PREFIX};
pub use errors::{InvalidEmitterReason, RegistryError};
pub use invariants::{invariant_owner_matches, invariant_valid_foreign_emitter};
