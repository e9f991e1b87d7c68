//! In-memory delivery ledger.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::MessageKey;
use tracing::{debug, warn};

use crate::domain::{DeliveryError, DeliveryRecord, RecordOutcome};
use crate::ports::DeliveryLedgerApi;

/// Delivered messages held in memory.
///
/// The check and the insert happen under one write guard.
#[derive(Debug, Default)]
pub struct InMemoryDeliveryLedger {
    records: RwLock<HashMap<MessageKey, DeliveryRecord>>,
}

impl InMemoryDeliveryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeliveryLedgerApi for InMemoryDeliveryLedger {
    fn record_if_absent(
        &self,
        key: MessageKey,
        record: DeliveryRecord,
    ) -> Result<RecordOutcome, DeliveryError> {
        match self.records.write().entry(key) {
            Entry::Occupied(_) => {
                warn!("[gm-05] Replay of {} rejected", key);
                Ok(RecordOutcome::AlreadyDelivered)
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                debug!("[gm-05] Recorded delivery of {}", key);
                Ok(RecordOutcome::Inserted)
            }
        }
    }

    fn get(&self, key: &MessageKey) -> Result<Option<DeliveryRecord>, DeliveryError> {
        Ok(self.records.read().get(key).cloned())
    }

    fn contains(&self, key: &MessageKey) -> Result<bool, DeliveryError> {
        Ok(self.records.read().contains_key(key))
    }

    fn len(&self) -> Result<usize, DeliveryError> {
        Ok(self.records.read().len())
    }
}
