//! # Domain Entities
//!
//! Attestations, guardian signatures and guardian sets.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Address, Hash, Timestamp};

/// Guardian signature length: r (32) || s (32) || v (1).
pub const SIGNATURE_LENGTH: usize = 65;

/// Minimum number of valid signatures for a set of `n` guardians.
///
/// Strictly more than two-thirds: `floor(2n/3) + 1`. For `n = 19` this is 13.
pub const fn quorum(n: usize) -> usize {
    (n * 2) / 3 + 1
}

/// One guardian's signature over an envelope digest.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianSignature {
    /// Position of the signer in the guardian set.
    pub index: u8,
    /// Recoverable secp256k1 signature: r || s || v.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; SIGNATURE_LENGTH],
}

impl GuardianSignature {
    /// R component.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.signature[..32]);
        r
    }

    /// S component.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.signature[32..64]);
        s
    }

    /// Recovery byte.
    pub fn v(&self) -> u8 {
        self.signature[64]
    }
}

/// Quorum-endorsed claim that an envelope digest is authentic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// Digest of the canonical envelope encoding.
    pub digest: Hash,
    /// Guardian set the signatures were produced under.
    pub guardian_set_index: u32,
    /// Signatures, each referencing a position in the guardian set.
    pub signatures: Vec<GuardianSignature>,
}

/// A versioned guardian set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianSet {
    /// Monotonic set index.
    pub index: u32,
    /// Ethereum-style addresses of the guardians, in signer-index order.
    pub keys: Vec<Address>,
    /// When the set was installed.
    pub creation_time: Timestamp,
    /// When the set stops being valid. `None` while it is current.
    pub expiration_time: Option<Timestamp>,
}

impl GuardianSet {
    /// A current (non-expiring) set.
    pub fn new(index: u32, keys: Vec<Address>, creation_time: Timestamp) -> Self {
        Self {
            index,
            keys,
            creation_time,
            expiration_time: None,
        }
    }

    /// Number of guardians.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set has no guardians.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Signatures required for this set.
    pub fn quorum(&self) -> usize {
        quorum(self.keys.len())
    }

    /// Whether the set has expired at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        matches!(self.expiration_time, Some(expiry) if now >= expiry)
    }
}

/// What to do with attestations under a guardian set that has expired.
///
/// Whether an expired set may still back older messages is a deployment
/// decision, so it is configuration rather than a fixed rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryPolicy {
    /// Reject once `now >= expiration_time`. The rotation TTL is the whole
    /// grace window.
    #[default]
    Strict,
    /// Also accept an expired set when the envelope's own timestamp is before
    /// the set's expiration.
    AttestedBeforeExpiry,
}

impl ExpiryPolicy {
    /// Whether `set` may back an envelope stamped `envelope_timestamp` at `now`.
    pub fn allows(&self, set: &GuardianSet, now: Timestamp, envelope_timestamp: u32) -> bool {
        let Some(expiry) = set.expiration_time else {
            return true;
        };
        match self {
            ExpiryPolicy::Strict => now < expiry,
            ExpiryPolicy::AttestedBeforeExpiry => {
                now < expiry || u64::from(envelope_timestamp) < expiry
            }
        }
    }
}

impl std::str::FromStr for ExpiryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ExpiryPolicy::Strict),
            "attested-before-expiry" => Ok(ExpiryPolicy::AttestedBeforeExpiry),
            other => Err(format!("unknown expiry policy: {}", other)),
        }
    }
}

/// Outcome of a successful verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedAttestation {
    /// Digest that was verified.
    pub digest: Hash,
    /// Guardian set used.
    pub guardian_set_index: u32,
    /// Count of distinct valid signatures.
    pub valid_signatures: usize,
    /// Quorum required by the set.
    pub quorum: usize,
}
