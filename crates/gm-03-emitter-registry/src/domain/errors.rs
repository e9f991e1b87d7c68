//! # Domain Errors

use shared_types::{ChainId, KVStoreError};
use thiserror::Error;

/// Why a foreign emitter registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEmitterReason {
    /// Chain id 0 is reserved.
    UnsetChain,
    /// A messenger never trusts its own chain as a foreign source.
    LocalChain,
    /// The zero address cannot emit.
    ZeroAddress,
    /// The address has dirty padding for the chain's width.
    NonCanonicalAddress,
}

impl std::fmt::Display for InvalidEmitterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidEmitterReason::UnsetChain => "chain id 0 is reserved",
            InvalidEmitterReason::LocalChain => "chain is the local chain",
            InvalidEmitterReason::ZeroAddress => "address is zero",
            InvalidEmitterReason::NonCanonicalAddress => "address padding is not canonical",
        };
        f.write_str(text)
    }
}

/// Emitter registry failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Mutation attempted without the owner credential.
    #[error("Unauthorized: caller is not the registry owner")]
    Unauthorized,

    /// No emitter registered for the chain.
    #[error("No emitter registered for {chain}")]
    NotRegistered {
        /// Chain looked up
        chain: ChainId,
    },

    /// Registration refused by validation.
    #[error("Invalid foreign emitter for {chain}: {reason}")]
    InvalidForeignEmitter {
        /// Chain of the rejected registration
        chain: ChainId,
        /// Rule that was violated
        reason: InvalidEmitterReason,
    },

    /// A persisted record did not hold a 32-byte address.
    #[error("Corrupted registration for {chain}")]
    Corrupted {
        /// Chain whose record is damaged
        chain: ChainId,
    },

    /// Backing store failed.
    #[error("Registry storage error: {0}")]
    Storage(#[from] KVStoreError),
}
