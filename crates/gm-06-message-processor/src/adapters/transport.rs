//! Loopback transport.
//!
//! Stands in for the originating chain: submitted envelopes are validated,
//! given a transaction reference and shown to the devnet guardians.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use gm_01_envelope_codec::{decode, keccak256};
use parking_lot::Mutex;
use shared_types::MessageKey;
use tracing::info;

use crate::adapters::DevnetAttestationOracle;
use crate::domain::{ReadyMessage, TransactionRef, TransportError};
use crate::ports::Transport;

/// In-process transport.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    guardians: Option<Arc<DevnetAttestationOracle>>,
    emitted: Mutex<HashMap<TransactionRef, MessageKey>>,
}

impl LoopbackTransport {
    /// Transport nobody observes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose submissions are observed by `guardians`.
    pub fn observed_by(guardians: Arc<DevnetAttestationOracle>) -> Self {
        Self {
            guardians: Some(guardians),
            emitted: Mutex::new(HashMap::new()),
        }
    }

    /// Number of submitted envelopes.
    pub fn submitted(&self) -> usize {
        self.emitted.lock().len()
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    async fn submit(&self, message: &ReadyMessage) -> Result<TransactionRef, TransportError> {
        let envelope = decode(&message.bytes)?;
        let key = envelope.message_key();
        let tx = TransactionRef(keccak256(&message.bytes));

        self.emitted.lock().insert(tx, key);
        if let Some(guardians) = &self.guardians {
            guardians.observe(envelope);
        }

        info!("[gm-06] Submitted {} in {}", key, tx);
        Ok(tx)
    }

    async fn emitted(&self, tx: &TransactionRef) -> Result<Option<MessageKey>, TransportError> {
        Ok(self.emitted.lock().get(tx).copied())
    }
}
