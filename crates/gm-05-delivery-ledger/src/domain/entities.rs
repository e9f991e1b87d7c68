//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Hash, MessageKey, Timestamp};

/// Key namespace for persisted records.
pub const DELIVERY_KEY_PREFIX: &[u8] = b"received";

/// Persisted key: `b"received" || chain (u16 BE) || address (32) || sequence (u64 BE)`.
pub fn delivery_storage_key(key: &MessageKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(DELIVERY_KEY_PREFIX.len() + MessageKey::ENCODED_LEN);
    out.extend_from_slice(DELIVERY_KEY_PREFIX);
    out.extend_from_slice(&key.to_bytes());
    out
}

/// Proof that a message was redeemed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Payload handed to the application.
    pub payload: Vec<u8>,
    /// Digest of the attested envelope.
    pub digest: Hash,
    /// Application nonce carried by the envelope.
    pub nonce: u32,
    /// When the message was redeemed.
    pub redeemed_at: Timestamp,
}

/// Result of `record_if_absent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The record was written by this call.
    Inserted,
    /// A record already existed and was left unchanged.
    AlreadyDelivered,
}

impl RecordOutcome {
    /// Whether this call wrote the record.
    pub fn is_inserted(&self) -> bool {
        matches!(self, RecordOutcome::Inserted)
    }
}
