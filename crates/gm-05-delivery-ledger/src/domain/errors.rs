//! # Domain Errors

use shared_types::{KVStoreError, MessageKey};
use thiserror::Error;

/// Delivery ledger failures. A replay is not an error; see `RecordOutcome`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// A stored record could not be decoded.
    #[error("Corrupted delivery record for {key}: {message}")]
    Corrupted {
        /// Key of the damaged record
        key: MessageKey,
        /// Decoder message
        message: String,
    },

    /// A record could not be encoded.
    #[error("Failed to encode delivery record: {0}")]
    Encoding(String),

    /// Backing store failed.
    #[error("Delivery storage error: {0}")]
    Storage(#[from] KVStoreError),
}
