//! Emitter registry persisted through a `KeyValueStore`.

use parking_lot::Mutex;
use shared_types::{ChainId, KeyValueStore, UniversalAddress};
use tracing::{error, info, warn};

use crate::domain::{
    invariant_owner_matches, invariant_valid_foreign_emitter, registry_storage_key,
    ForeignEmitter, OwnerCredential, RegistryError, REGISTRY_KEY_PREFIX,
};
use crate::ports::EmitterRegistryApi;

/// Durable registry. Each record is the raw 32-byte address; a single
/// `put` replaces it, so readers see either the old or the new value.
pub struct KvEmitterRegistry<S: KeyValueStore> {
    owner: OwnerCredential,
    local_chain: ChainId,
    store: Mutex<S>,
}

impl<S: KeyValueStore> KvEmitterRegistry<S> {
    /// Wrap a store.
    pub fn new(owner: OwnerCredential, local_chain: ChainId, store: S) -> Self {
        Self {
            owner,
            local_chain,
            store: Mutex::new(store),
        }
    }

    fn parse(chain: ChainId, bytes: &[u8]) -> Result<UniversalAddress, RegistryError> {
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| RegistryError::Corrupted { chain })?;
        Ok(UniversalAddress(raw))
    }
}

impl<S: KeyValueStore> EmitterRegistryApi for KvEmitterRegistry<S> {
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

        let key = registry_storage_key(chain);
        let mut store = self.store.lock();
        let previous = store
            .get(&key)?
            .map(|bytes| Self::parse(chain, &bytes))
            .transpose()?;

        store.put(&key, address.as_bytes()).map_err(|e| {
            error!("[gm-03] Failed to persist emitter for {}: {}", chain, e);
            RegistryError::from(e)
        })?;

        info!("[gm-03] Registered emitter {} for {}", address, chain);
        Ok(previous.map(|prev| ForeignEmitter::new(chain, prev)))
    }

    fn lookup(&self, chain: ChainId) -> Result<UniversalAddress, RegistryError> {
        let store = self.store.lock();
        match store.get(&registry_storage_key(chain))? {
            Some(bytes) => Self::parse(chain, &bytes),
            None => Err(RegistryError::NotRegistered { chain }),
        }
    }

    fn registrations(&self) -> Result<Vec<ForeignEmitter>, RegistryError> {
        let store = self.store.lock();
        store
            .prefix_scan(REGISTRY_KEY_PREFIX)?
            .into_iter()
            .filter_map(|(key, value)| {
                let chain_bytes: [u8; 2] = key.get(REGISTRY_KEY_PREFIX.len()..)?.try_into().ok()?;
                let chain = ChainId(u16::from_be_bytes(chain_bytes));
                Some(Self::parse(chain, &value).map(|address| ForeignEmitter::new(chain, address)))
            })
            .collect()
    }

    fn local_chain(&self) -> ChainId {
        self.local_chain
    }
}
