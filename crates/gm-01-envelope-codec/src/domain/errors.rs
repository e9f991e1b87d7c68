//! # Domain Errors
//!
//! Decode failures for envelopes and application payloads.

use shared_types::ChainId;
use thiserror::Error;

/// Malformed or non-canonical envelope bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Input ended before a field was complete.
    #[error("Truncated envelope: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required to finish decoding
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Version tag is not one this codec understands.
    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u8),

    /// Emitter address carries non-zero bytes in its padding region.
    #[error("Non-canonical emitter address for {chain}")]
    NonCanonicalAddress {
        /// Chain whose padding rule was violated
        chain: ChainId,
    },

    /// Bytes left over after the declared payload.
    #[error("Trailing bytes after payload: {0}")]
    TrailingBytes(usize),

    /// Payload exceeds the codec limit.
    #[error("Payload too large: {len} bytes (max {max})")]
    PayloadTooLarge {
        /// Declared payload length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Sequence numbers start at 1.
    #[error("Envelope sequence must be non-zero")]
    ZeroSequence,
}

/// Malformed application payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Empty input.
    #[error("Empty payload")]
    Empty,

    /// Payload id is not known.
    #[error("Unknown payload id: {0}")]
    UnknownPayloadId(u8),

    /// Input ended early.
    #[error("Truncated payload: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes present
        available: usize,
    },

    /// Hello message exceeds the size limit.
    #[error("Message too long: {len} bytes (max {max})")]
    MessageTooLong {
        /// Message length
        len: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Bytes left over after the payload.
    #[error("Trailing bytes after payload: {0}")]
    TrailingBytes(usize),
}
