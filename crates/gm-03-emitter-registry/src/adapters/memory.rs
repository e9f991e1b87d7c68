//! In-memory emitter registry.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use shared_types::{ChainId, UniversalAddress};
use tracing::{info, warn};

use crate::domain::{
    invariant_owner_matches, invariant_valid_foreign_emitter, ForeignEmitter, OwnerCredential,
    RegistryError,
};
use crate::ports::EmitterRegistryApi;

/// Registry held in a `RwLock`ed map.
///
/// `UniversalAddress` is `Copy`; a lookup copies the whole record out under
/// the read lock, so it can never observe a half-written registration.
#[derive(Debug)]
pub struct InMemoryEmitterRegistry {
    owner: OwnerCredential,
    local_chain: ChainId,
    emitters: RwLock<BTreeMap<ChainId, UniversalAddress>>,
}

impl InMemoryEmitterRegistry {
    /// Create an empty registry owned by `owner`.
    pub fn new(owner: OwnerCredential, local_chain: ChainId) -> Self {
        Self {
            owner,
            local_chain,
            emitters: RwLock::new(BTreeMap::new()),
        }
    }
}

impl EmitterRegistryApi for InMemoryEmitterRegistry {
    fn register(
        &self,
        credential: &OwnerCredential,
        chain: ChainId,
        address: UniversalAddress,
    ) -> Result<Option<ForeignEmitter>, RegistryError> {
        if let Err(e) = invariant_owner_matches(&self.owner, credential) {
            warn!("[gm-03] Rejected registration for {}: not owner", chain);
            return Err(e);
        }
        invariant_valid_foreign_emitter(self.local_chain, chain, &address)?;

        let previous = self.emitters.write().insert(chain, address);
        info!("[gm-03] Registered emitter {} for {}", address, chain);
        Ok(previous.map(|prev| ForeignEmitter::new(chain, prev)))
    }

    fn lookup(&self, chain: ChainId) -> Result<UniversalAddress, RegistryError> {
        self.emitters
            .read()
            .get(&chain)
            .copied()
            .ok_or(RegistryError::NotRegistered { chain })
    }

    fn registrations(&self) -> Result<Vec<ForeignEmitter>, RegistryError> {
        Ok(self
            .emitters
            .read()
            .iter()
            .map(|(chain, address)| ForeignEmitter::new(*chain, *address))
            .collect())
    }

    fn local_chain(&self) -> ChainId {
        self.local_chain
    }
}
