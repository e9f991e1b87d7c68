//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{ChainId, EmitterKey, UniversalAddress};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key namespace for persisted registrations.
pub const REGISTRY_KEY_PREFIX: &[u8] = b"foreign_emitter";

/// Persisted key: `b"foreign_emitter" || chain (u16 BE)`.
pub fn registry_storage_key(chain: ChainId) -> Vec<u8> {
    let mut key = Vec::with_capacity(REGISTRY_KEY_PREFIX.len() + 2);
    key.extend_from_slice(REGISTRY_KEY_PREFIX);
    key.extend_from_slice(&chain.as_u16().to_be_bytes());
    key
}

/// The single trusted emitter for a foreign chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignEmitter {
    /// Foreign chain.
    pub chain: ChainId,
    /// Trusted emitter address on that chain.
    pub address: UniversalAddress,
}

impl ForeignEmitter {
    /// Create a registration record.
    pub fn new(chain: ChainId, address: UniversalAddress) -> Self {
        Self { chain, address }
    }

    /// Whether `emitter` is exactly this registration.
    pub fn verify(&self, emitter: &EmitterKey) -> bool {
        self.chain == emitter.chain && self.address == emitter.address
    }
}

/// Secret proving the caller is the registry owner.
///
/// Compared in constant time and zeroized on drop. Never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OwnerCredential {
    secret: [u8; 32],
}

impl OwnerCredential {
    /// Wrap a 32-byte secret.
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Parse a 32-byte hex secret (with or without `0x`).
    pub fn from_hex(value: &str) -> Option<Self> {
        let trimmed = value.strip_prefix("0x").unwrap_or(value);
        let mut bytes = hex::decode(trimmed).ok()?;
        let secret: Option<[u8; 32]> = bytes.as_slice().try_into().ok();
        bytes.zeroize();
        secret.map(Self::new)
    }

    /// Whether every byte is zero. A zero secret is never a valid owner.
    pub fn is_zero(&self) -> bool {
        bool::from(self.secret.ct_eq(&[0u8; 32]))
    }

    /// Constant-time equality.
    pub fn matches(&self, other: &OwnerCredential) -> bool {
        bool::from(self.secret.ct_eq(&other.secret))
    }
}

impl std::fmt::Debug for OwnerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OwnerCredential(***)")
    }
}
