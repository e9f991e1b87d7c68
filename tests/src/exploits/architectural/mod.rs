//! # Architectural Attacks
//!
//! Attacks that cross subsystem boundaries: the digest binding between
//! codec and verifier, the registry between verifier and ledger, and
//! guardian set rotation.

pub mod digest_substitution;
pub mod guardian_rotation;
