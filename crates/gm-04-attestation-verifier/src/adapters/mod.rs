//! # Adapters
//!
//! - `InMemoryGuardianSetStore`: versioned guardian sets with rotation
//! - `DevnetGuardians`: in-process guardian network for devnets and tests

pub mod devnet;
pub mod guardian_sets;

pub use devnet::DevnetGuardians;
pub use guardian_sets::{InMemoryGuardianSetStore, DEFAULT_GUARDIAN_SET_TTL_SECS};
