//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies this subsystem needs from the host.

use crate::domain::entities::GuardianSet;

/// Resolves guardian set indices to key sets and validity windows.
pub trait GuardianSetResolver: Send + Sync {
    /// Guardian set at `index`, expired or not.
    fn guardian_set(&self, index: u32) -> Option<GuardianSet>;

    /// Index of the set currently used for signing.
    fn current_index(&self) -> Option<u32>;
}

impl<T: GuardianSetResolver + ?Sized> GuardianSetResolver for std::sync::Arc<T> {
    fn guardian_set(&self, index: u32) -> Option<GuardianSet> {
        (**self).guardian_set(index)
    }

    fn current_index(&self) -> Option<u32> {
        (**self).current_index()
    }
}
