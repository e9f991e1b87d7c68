//! # Inbound Ports
//!
//! API trait defining what the Emitter Registry can do.

use shared_types::{ChainId, EmitterKey, UniversalAddress};

use crate::domain::{ForeignEmitter, OwnerCredential, RegistryError};

/// Emitter registry API - inbound port.
pub trait EmitterRegistryApi: Send + Sync {
    /// Register (or replace) the trusted emitter for `chain`.
    ///
    /// Returns the registration that was replaced, if any.
    fn register(
        &self,
        credential: &OwnerCredential,
        chain: ChainId,
        address: UniversalAddress,
    ) -> Result<Option<ForeignEmitter>, RegistryError>;

    /// Trusted emitter address for `chain`.
    fn lookup(&self, chain: ChainId) -> Result<UniversalAddress, RegistryError>;

    /// Whether `emitter` is the registered emitter for its chain.
    fn is_authorized(&self, emitter: &EmitterKey) -> Result<bool, RegistryError> {
        match self.lookup(emitter.chain) {
            Ok(address) => Ok(address == emitter.address),
            Err(RegistryError::NotRegistered { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All registrations, ordered by chain id.
    fn registrations(&self) -> Result<Vec<ForeignEmitter>, RegistryError>;

    /// Chain this registry runs on.
    fn local_chain(&self) -> ChainId;
}
