//! # Inbound Ports
//!
//! API trait defining what the Delivery Ledger can do. There is deliberately
//! no update or delete.

use shared_types::MessageKey;

use crate::domain::{DeliveryError, DeliveryRecord, RecordOutcome};

/// Delivery ledger API - inbound port.
pub trait DeliveryLedgerApi: Send + Sync {
    /// Atomically write `record` under `key` unless a record already exists.
    ///
    /// Linearizable per key: of two racing calls, one returns `Inserted`
    /// and the other `AlreadyDelivered`. An existing record is never touched.
    fn record_if_absent(
        &self,
        key: MessageKey,
        record: DeliveryRecord,
    ) -> Result<RecordOutcome, DeliveryError>;

    /// Stored record for `key`.
    fn get(&self, key: &MessageKey) -> Result<Option<DeliveryRecord>, DeliveryError>;

    /// Whether `key` has been delivered.
    fn contains(&self, key: &MessageKey) -> Result<bool, DeliveryError> {
        Ok(self.get(key)?.is_some())
    }

    /// Number of delivered messages.
    fn len(&self) -> Result<usize, DeliveryError>;

    /// Whether nothing has been delivered.
    fn is_empty(&self) -> Result<bool, DeliveryError> {
        Ok(self.len()? == 0)
    }
}
