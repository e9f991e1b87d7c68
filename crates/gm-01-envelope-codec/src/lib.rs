//! # Envelope Codec (GM-01)
//!
//! Canonical byte layout for cross-chain message envelopes.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Pure domain library (no ports, no I/O)
//!
//! ## Wire Layout (big-endian, no padding)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | version tag (`1`) |
//! | 1 | 4 | timestamp |
//! | 5 | 4 | nonce |
//! | 9 | 2 | emitter chain |
//! | 11 | 32 | emitter address |
//! | 43 | 8 | sequence |
//! | 51 | 1 | consistency level |
//! | 52 | 4 | payload length |
//! | 56 | n | payload |
//!
//! ## Security Notes
//!
//! - Non-canonical address padding is rejected, never normalized. Two byte
//!   strings that decode to the same envelope would otherwise yield two
//!   digests for one message.
//! - The digest is `keccak256(keccak256(bytes))`, the value guardians sign.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

pub use domain::codec::{
    decode, digest, digest_bytes, encode, keccak256, ENVELOPE_VERSION, HEADER_LEN,
    MAX_PAYLOAD_SIZE,
};
pub use domain::entities::{Envelope, EnvelopeBuilder};
pub use domain::errors::{EnvelopeError, PayloadError};
pub use domain::payload::{MessengerPayload, MAX_HELLO_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
