//! Delivery ledger persisted through a `KeyValueStore`.

use parking_lot::Mutex;
use shared_types::{KeyValueStore, MessageKey};
use tracing::{debug, error, warn};

use crate::domain::{
    delivery_storage_key, DeliveryError, DeliveryRecord, RecordOutcome, DELIVERY_KEY_PREFIX,
};
use crate::ports::DeliveryLedgerApi;

/// Durable replay guard.
///
/// Records are bincode-encoded. Existence check and write run under the
/// store mutex, so two processors sharing one ledger cannot both insert.
pub struct KvDeliveryLedger<S: KeyValueStore> {
    store: Mutex<S>,
}

impl<S: KeyValueStore> KvDeliveryLedger<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Release the underlying store.
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }
}

impl<S: KeyValueStore> DeliveryLedgerApi for KvDeliveryLedger<S> {
    fn record_if_absent(
        &self,
        key: MessageKey,
        record: DeliveryRecord,
    ) -> Result<RecordOutcome, DeliveryError> {
        let storage_key = delivery_storage_key(&key);
        let value =
            bincode::serialize(&record).map_err(|e| DeliveryError::Encoding(e.to_string()))?;

        let mut store = self.store.lock();
        if store.exists(&storage_key)? {
            warn!("[gm-05] Replay of {} rejected", key);
            return Ok(RecordOutcome::AlreadyDelivered);
        }

        store.put(&storage_key, &value).map_err(|e| {
            error!("[gm-05] Failed to persist delivery of {}: {}", key, e);
            DeliveryError::from(e)
        })?;

        debug!("[gm-05] Recorded delivery of {}", key);
        Ok(RecordOutcome::Inserted)
    }

    fn get(&self, key: &MessageKey) -> Result<Option<DeliveryRecord>, DeliveryError> {
        let bytes = match self.store.lock().get(&delivery_storage_key(key))? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(|e| DeliveryError::Corrupted {
                key: *key,
                message: e.to_string(),
            })
    }

    fn contains(&self, key: &MessageKey) -> Result<bool, DeliveryError> {
        Ok(self.store.lock().exists(&delivery_storage_key(key))?)
    }

    fn len(&self) -> Result<usize, DeliveryError> {
        Ok(self.store.lock().prefix_scan(DELIVERY_KEY_PREFIX)?.len())
    }
}
