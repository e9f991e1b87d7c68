//! Delivery sinks.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::Delivery;
use crate::ports::DeliverySink;

/// Keeps every delivery in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }

    /// Drain delivered messages.
    pub fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }

    /// Number of deliveries.
    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    /// Whether nothing was delivered.
    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }
}

impl DeliverySink for CollectingSink {
    fn deliver(&self, delivery: &Delivery) {
        self.deliveries.lock().push(delivery.clone());
    }
}

/// Forwards deliveries to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl ChannelSink {
    /// Sink plus the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DeliverySink for ChannelSink {
    fn deliver(&self, delivery: &Delivery) {
        // The record is already committed; a closed receiver only loses the
        // notification, the payload stays readable from the delivery ledger.
        if self.tx.send(delivery.clone()).is_err() {
            warn!(
                "[gm-06] Delivery consumer gone, {} only recorded",
                delivery.key
            );
        }
    }
}
