//! # Verification Errors

use gm_01_envelope_codec::EnvelopeError;
use shared_types::{Hash, Timestamp};
use thiserror::Error;

/// Low-level failures recovering a single secp256k1 signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// R or S out of range, or R not on the curve.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signing failed (devnet guardians only).
    #[error("Signing failed")]
    SigningFailed,
}

/// Why an attestation was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Attestation digest differs from the recomputed envelope digest.
    #[error("Digest mismatch: attestation 0x{}, envelope 0x{}", hex_short(.attested), hex_short(.computed))]
    DigestMismatch {
        /// Digest carried by the attestation
        attested: Hash,
        /// Digest recomputed from the envelope
        computed: Hash,
    },

    /// Guardian set index unknown, or the set has expired under the policy.
    #[error("Unknown guardian set {index}{}", .expired_at.map(|t| format!(" (expired at {})", t)).unwrap_or_default())]
    UnknownSignerSet {
        /// Requested guardian set index
        index: u32,
        /// Expiration time when the set exists but is expired
        expired_at: Option<Timestamp>,
    },

    /// A signature did not recover to the guardian at its index.
    #[error("Invalid signature from guardian {index}")]
    InvalidSignature {
        /// Offending signer index
        index: u8,
    },

    /// A signer index appears more than once.
    #[error("Duplicate signer index {index}")]
    DuplicateSigner {
        /// Repeated signer index
        index: u8,
    },

    /// A signer index is beyond the set size.
    #[error("Signer index {index} out of range for set of {set_size}")]
    OutOfRangeSigner {
        /// Offending signer index
        index: u8,
        /// Guardian set size
        set_size: usize,
    },

    /// Fewer valid signatures than required.
    #[error("Quorum not met: {valid} of {required} required (set size {set_size})")]
    QuorumNotMet {
        /// Distinct valid signatures
        valid: usize,
        /// Required quorum
        required: usize,
        /// Guardian set size
        set_size: usize,
    },

    /// The envelope itself could not be encoded.
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
}

impl VerificationError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::DigestMismatch { .. } => "digest_mismatch",
            VerificationError::UnknownSignerSet { .. } => "unknown_signer_set",
            VerificationError::InvalidSignature { .. } => "invalid_signature",
            VerificationError::DuplicateSigner { .. } => "duplicate_signer",
            VerificationError::OutOfRangeSigner { .. } => "out_of_range_signer",
            VerificationError::QuorumNotMet { .. } => "quorum_not_met",
            VerificationError::Envelope(_) => "malformed_envelope",
        }
    }
}

/// Malformed signed-VAA framing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaaError {
    /// Input ended early.
    #[error("Truncated VAA: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes present
        available: usize,
    },

    /// Unknown framing version.
    #[error("Unsupported VAA version: {0}")]
    UnsupportedVersion(u8),

    /// More signatures than a frame can carry.
    #[error("Too many signatures: {0}")]
    TooManySignatures(usize),

    /// Embedded envelope is malformed.
    #[error("Invalid embedded envelope: {0}")]
    Envelope(#[from] EnvelopeError),
}

fn hex_short(hash: &Hash) -> String {
    hash[..4].iter().map(|b| format!("{:02x}", b)).collect()
}
