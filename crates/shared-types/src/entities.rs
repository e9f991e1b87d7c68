//! # Core Domain Entities
//!
//! Identifiers shared by every messaging subsystem.
//!
//! ## Clusters
//!
//! - **Chains**: `ChainId`, `AddressWidth`
//! - **Addresses**: `UniversalAddress`
//! - **Keys**: `EmitterKey` (sequence counters, registry), `MessageKey`
//!   (delivery ledger primary key)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AddressError;

/// A 32-byte hash (Keccak-256 digests).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

// =============================================================================
// CLUSTER A: CHAINS
// =============================================================================

/// Native width of account addresses on a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressWidth {
    /// 20-byte addresses (EVM family). Carried left-padded with 12 zero bytes.
    Bytes20,
    /// 32-byte addresses (Solana, Move chains). Carried as-is.
    Bytes32,
}

impl AddressWidth {
    /// Number of leading bytes that must be zero in the universal form.
    pub const fn padding(&self) -> usize {
        match self {
            AddressWidth::Bytes20 => 12,
            AddressWidth::Bytes32 => 0,
        }
    }
}

/// Numeric chain identifier from the stable registry of codes.
///
/// Codes are wire-level constants; never renumber an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub u16);

impl ChainId {
    /// Reserved. Never a valid emitter chain.
    pub const UNSET: ChainId = ChainId(0);
    /// Solana.
    pub const SOLANA: ChainId = ChainId(1);
    /// Ethereum mainnet.
    pub const ETHEREUM: ChainId = ChainId(2);
    /// BNB Smart Chain.
    pub const BSC: ChainId = ChainId(4);
    /// Polygon PoS.
    pub const POLYGON: ChainId = ChainId(5);
    /// Avalanche C-Chain.
    pub const AVALANCHE: ChainId = ChainId(6);
    /// Sui.
    pub const SUI: ChainId = ChainId(21);
    /// Aptos.
    pub const APTOS: ChainId = ChainId(22);
    /// Arbitrum One.
    pub const ARBITRUM: ChainId = ChainId(23);
    /// Optimism.
    pub const OPTIMISM: ChainId = ChainId(24);
    /// Base.
    pub const BASE: ChainId = ChainId(30);

    /// Raw numeric code.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Whether this is the reserved zero code.
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Native address width used for canonical padding checks.
    ///
    /// Unknown codes are treated as 32-byte chains: no padding rule applies.
    pub const fn address_width(&self) -> AddressWidth {
        match self.0 {
            2 | 4 | 5 | 6 | 23 | 24 | 30 => AddressWidth::Bytes20,
            _ => AddressWidth::Bytes32,
        }
    }

    /// Human-readable name for logs.
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "unset",
            1 => "solana",
            2 => "ethereum",
            4 => "bsc",
            5 => "polygon",
            6 => "avalanche",
            21 => "sui",
            22 => "aptos",
            23 => "arbitrum",
            24 => "optimism",
            30 => "base",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

impl From<u16> for ChainId {
    fn from(value: u16) -> Self {
        ChainId(value)
    }
}

// =============================================================================
// CLUSTER B: ADDRESSES
// =============================================================================

/// 32-byte chain-agnostic address.
///
/// ## Padding Rules
///
/// - 20-byte chains: bytes `0..12` are zero, bytes `12..32` hold the address.
/// - 32-byte chains: all 32 bytes are significant.
///
/// Non-canonical padding is rejected, never normalized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct UniversalAddress(pub [u8; 32]);

impl UniversalAddress {
    /// The all-zero address.
    pub const ZERO: UniversalAddress = UniversalAddress([0u8; 32]);

    /// Wrap a native 32-byte address.
    pub const fn from_bytes32(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Left-pad a 20-byte EVM address.
    pub fn from_evm(address: Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..].copy_from_slice(&address);
        Self(bytes)
    }

    /// Build a universal address from a native address of the chain's width.
    pub fn from_native(chain: ChainId, native: &[u8]) -> Result<Self, AddressError> {
        match (chain.address_width(), native.len()) {
            (AddressWidth::Bytes20, 20) => {
                let mut address = [0u8; 20];
                address.copy_from_slice(native);
                Ok(Self::from_evm(address))
            }
            (AddressWidth::Bytes32, 32) => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(native);
                Ok(Self(bytes))
            }
            (width, len) => Err(AddressError::WrongWidth {
                chain,
                expected: 32 - width.padding(),
                actual: len,
            }),
        }
    }

    /// Parse a hex string (with or without `0x`) of exactly 32 bytes.
    pub fn from_hex(value: &str) -> Result<Self, AddressError> {
        let trimmed = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(trimmed).map_err(|_| AddressError::InvalidHex)?;
        if bytes.len() != 32 {
            return Err(AddressError::WrongWidth {
                chain: ChainId::UNSET,
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Check the padding rule for `chain`.
    pub fn is_canonical_for(&self, chain: ChainId) -> bool {
        let pad = chain.address_width().padding();
        self.0[..pad].iter().all(|&b| b == 0)
    }

    /// Extract the 20-byte EVM address if the padding is canonical.
    pub fn to_evm(&self) -> Option<Address> {
        if !self.0[..12].iter().all(|&b| b == 0) {
            return None;
        }
        let mut address = [0u8; 20];
        address.copy_from_slice(&self.0[12..]);
        Some(address)
    }
}

impl fmt::Debug for UniversalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniversalAddress(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for UniversalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for UniversalAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CLUSTER C: KEYS
// =============================================================================

/// Identity of an emitter: the logical sender of envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmitterKey {
    /// Chain the emitter lives on.
    pub chain: ChainId,
    /// Universal address of the emitter.
    pub address: UniversalAddress,
}

impl EmitterKey {
    /// Size of `to_bytes` output.
    pub const ENCODED_LEN: usize = 2 + 32;

    /// Create a new emitter key.
    pub const fn new(chain: ChainId, address: UniversalAddress) -> Self {
        Self { chain, address }
    }

    /// Fixed-width big-endian encoding: `chain || address`.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..2].copy_from_slice(&self.chain.0.to_be_bytes());
        out[2..].copy_from_slice(&self.address.0);
        out
    }
}

impl fmt::Display for EmitterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chain, self.address)
    }
}

/// Primary key of a delivered message.
///
/// `(emitter_chain, emitter_address, sequence)` is globally unique and
/// immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageKey {
    /// Origin chain.
    pub emitter_chain: ChainId,
    /// Origin emitter.
    pub emitter_address: UniversalAddress,
    /// Per-emitter sequence number.
    pub sequence: u64,
}

impl MessageKey {
    /// Size of `to_bytes` output.
    pub const ENCODED_LEN: usize = 2 + 32 + 8;

    /// Create a new message key.
    pub const fn new(emitter: EmitterKey, sequence: u64) -> Self {
        Self {
            emitter_chain: emitter.chain,
            emitter_address: emitter.address,
            sequence,
        }
    }

    /// Emitter half of the key.
    pub const fn emitter(&self) -> EmitterKey {
        EmitterKey::new(self.emitter_chain, self.emitter_address)
    }

    /// Fixed-width big-endian encoding: `chain || address || sequence`.
    ///
    /// Big-endian keeps byte-wise ordering equal to numeric ordering, so a
    /// prefix scan over an emitter returns sequences in order.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..2].copy_from_slice(&self.emitter_chain.0.to_be_bytes());
        out[2..34].copy_from_slice(&self.emitter_address.0);
        out[34..].copy_from_slice(&self.sequence.to_be_bytes());
        out
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.emitter_chain, self.emitter_address, self.sequence
        )
    }
}
