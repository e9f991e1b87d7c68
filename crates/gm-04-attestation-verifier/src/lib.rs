//! # Attestation Verifier (GM-04)
//!
//! Validates guardian quorum signatures over envelope digests.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): secp256k1 recovery, quorum arithmetic, VAA framing
//! - **Ports Layer** (`ports/`): `AttestationVerifierApi`, `GuardianSetResolver`
//! - **Adapters** (`adapters/`): guardian set store with rotation, devnet guardians
//! - **Service Layer** (`service.rs`): wires resolver, clock and expiry policy
//!
//! ## Algorithm
//!
//! 1. Recompute the envelope digest; mismatch is `DigestMismatch`.
//! 2. Resolve the guardian set; missing or expired is `UnknownSignerSet`.
//! 3. Reject out-of-range and repeated signer indices.
//! 4. Recover every signature (in parallel) and compare the recovered
//!    address to the key at its index in constant time.
//! 5. Require `floor(2n/3) + 1` valid signatures.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **No short-circuit**: every signature is evaluated before the outcome is decided
//! - **Stateless**: verification mutates nothing and may run with unbounded parallelism

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{DevnetGuardians, InMemoryGuardianSetStore, DEFAULT_GUARDIAN_SET_TTL_SECS};
pub use domain::ecdsa::{address_from_pubkey, recover_address};
pub use domain::entities::{
    quorum, Attestation, ExpiryPolicy, GuardianSet, GuardianSignature, VerifiedAttestation,
    SIGNATURE_LENGTH,
};
pub use domain::errors::{SignatureError, VaaError, VerificationError};
pub use domain::vaa::{SignedVaa, VAA_VERSION};
pub use domain::verifier::verify_signatures;
pub use ports::{AttestationVerifierApi, GuardianSetResolver};
pub use service::AttestationVerifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
