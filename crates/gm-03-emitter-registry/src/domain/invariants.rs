//! # Domain Invariants
//!
//! Rules every adapter enforces before touching storage.

use shared_types::{ChainId, UniversalAddress};

use super::entities::OwnerCredential;
use super::errors::{InvalidEmitterReason, RegistryError};

/// Invariant: only the configured owner may mutate the registry.
pub fn invariant_owner_matches(
    owner: &OwnerCredential,
    presented: &OwnerCredential,
) -> Result<(), RegistryError> {
    if presented.is_zero() || !owner.matches(presented) {
        return Err(RegistryError::Unauthorized);
    }
    Ok(())
}

/// Invariant: a foreign emitter must be a real, canonical, non-local sender.
pub fn invariant_valid_foreign_emitter(
    local_chain: ChainId,
    chain: ChainId,
    address: &UniversalAddress,
) -> Result<(), RegistryError> {
    let reason = if chain.is_unset() {
        Some(InvalidEmitterReason::UnsetChain)
    } else if chain == local_chain {
        Some(InvalidEmitterReason::LocalChain)
    } else if address.is_zero() {
        Some(InvalidEmitterReason::ZeroAddress)
    } else if !address.is_canonical_for(chain) {
        Some(InvalidEmitterReason::NonCanonicalAddress)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RegistryError::InvalidForeignEmitter { chain, reason }),
        None => Ok(()),
    }
}
