//! Versioned guardian set store.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use shared_types::{Address, Timestamp};
use tracing::info;

use crate::domain::entities::GuardianSet;
use crate::ports::GuardianSetResolver;

/// Default time an old set stays valid after rotation (24 hours).
pub const DEFAULT_GUARDIAN_SET_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Default)]
struct Inner {
    sets: BTreeMap<u32, GuardianSet>,
    current: Option<u32>,
}

/// Guardian sets keyed by index. The current set never expires; a rotated-out
/// set expires `ttl_secs` after rotation and is retained so the expiry policy
/// can decide what to do with late attestations.
#[derive(Debug)]
pub struct InMemoryGuardianSetStore {
    inner: RwLock<Inner>,
    ttl_secs: u64,
}

impl InMemoryGuardianSetStore {
    /// Create an empty store.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            ttl_secs,
        }
    }

    /// Store whose initial set is `keys` at index 0.
    pub fn with_initial_set(keys: Vec<Address>, now: Timestamp, ttl_secs: u64) -> Self {
        let store = Self::new(ttl_secs);
        store.rotate(keys, now);
        store
    }

    /// Install the next guardian set and expire the current one.
    ///
    /// Returns the new set index.
    pub fn rotate(&self, keys: Vec<Address>, now: Timestamp) -> u32 {
        let mut inner = self.inner.write();

        let index = match inner.current {
            Some(current) => {
                if let Some(old) = inner.sets.get_mut(&current) {
                    old.expiration_time = Some(now.saturating_add(self.ttl_secs));
                }
                current + 1
            }
            None => 0,
        };

        info!(
            "[gm-04] Installed guardian set {} with {} guardians",
            index,
            keys.len()
        );
        inner.sets.insert(index, GuardianSet::new(index, keys, now));
        inner.current = Some(index);
        index
    }

    /// Grace window applied on rotation.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl Default for InMemoryGuardianSetStore {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDIAN_SET_TTL_SECS)
    }
}

impl GuardianSetResolver for InMemoryGuardianSetStore {
    fn guardian_set(&self, index: u32) -> Option<GuardianSet> {
        self.inner.read().sets.get(&index).cloned()
    }

    fn current_index(&self) -> Option<u32> {
        self.inner.read().current
    }
}
