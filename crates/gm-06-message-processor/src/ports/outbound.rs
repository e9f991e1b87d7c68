//! # Outbound Ports
//!
//! Traits for the application and the external collaborators around the
//! processor. Network-facing ports are async; the processor itself never
//! awaits them.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::MessageKey;

use crate::domain::{Delivery, OracleError, ReadyMessage, TransactionRef, TransportError};

/// Receives each inbound payload exactly once.
///
/// Called after the delivery record is committed, so a payload is never
/// handed over for a message that could later be accepted again.
pub trait DeliverySink: Send + Sync {
    /// Hand a payload to the application.
    fn deliver(&self, delivery: &Delivery);
}

impl<T: DeliverySink + ?Sized> DeliverySink for Arc<T> {
    fn deliver(&self, delivery: &Delivery) {
        (**self).deliver(delivery)
    }
}

/// Submits envelopes to the originating chain - outbound port.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a ready message and return a transaction reference.
    async fn submit(&self, message: &ReadyMessage) -> Result<TransactionRef, TransportError>;

    /// Identify the envelope emitted by a transaction, if it is known.
    async fn emitted(&self, tx: &TransactionRef) -> Result<Option<MessageKey>, TransportError>;
}

/// Guardian network view - outbound port.
#[async_trait]
pub trait AttestationOracle: Send + Sync {
    /// Signed VAA bytes for `key` once a quorum has signed, `None` before.
    async fn fetch(&self, key: &MessageKey) -> Result<Option<Vec<u8>>, OracleError>;
}

#[async_trait]
impl<T: AttestationOracle + ?Sized> AttestationOracle for Arc<T> {
    async fn fetch(&self, key: &MessageKey) -> Result<Option<Vec<u8>>, OracleError> {
        (**self).fetch(key).await
    }
}
