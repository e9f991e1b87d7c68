//! # Hello Messenger
//!
//! The application on top of the processor. It announces itself once with
//! `Alive`, sends `Hello` messages, and accepts only `Hello` payloads from
//! registered foreign messengers.

use std::sync::Arc;

use gm_01_envelope_codec::MessengerPayload;
use gm_03_emitter_registry::{ForeignEmitter, OwnerCredential};
use gm_05_delivery_ledger::DeliveryRecord;
use gm_telemetry::MESSAGES_REJECTED;
use shared_types::{ChainId, MessageKey, UniversalAddress};
use tracing::{info, warn};

use crate::config::MessengerConfig;
use crate::domain::{
    InboundOutcome, InvalidMessage, MessengerError, ProcessorError, ReadyMessage, RejectReason,
};
use crate::service::MessageProcessor;

/// Hello messenger bound to one processor.
pub struct Messenger {
    processor: Arc<MessageProcessor>,
    nonce: u32,
    consistency_level: u8,
}

impl Messenger {
    /// Create a messenger stamping outbound envelopes from `config`.
    pub fn new(processor: Arc<MessageProcessor>, config: &MessengerConfig) -> Self {
        Self {
            processor,
            nonce: config.nonce,
            consistency_level: config.consistency_level,
        }
    }

    /// Underlying processor.
    pub fn processor(&self) -> &Arc<MessageProcessor> {
        &self.processor
    }

    /// Announce this messenger with an `Alive` message carrying its address.
    pub fn initialize(&self) -> Result<ReadyMessage, MessengerError> {
        let emitter = self.processor.local_emitter();
        let payload = MessengerPayload::Alive {
            program_id: emitter.address.0,
        };
        let ready = self.publish(&payload)?;
        info!("[gm-06] Messenger {} initialized", emitter);
        Ok(ready)
    }

    /// Send a `Hello` carrying `message`.
    pub fn send_hello(&self, message: &[u8]) -> Result<ReadyMessage, MessengerError> {
        self.publish(&MessengerPayload::Hello {
            message: message.to_vec(),
        })
    }

    /// Redeem a signed VAA carrying a `Hello`.
    ///
    /// Payloads that are not a well-formed `Hello` are refused before the
    /// delivery ledger is touched, so they never consume the key.
    pub fn receive_hello(&self, vaa_bytes: &[u8]) -> Result<InboundOutcome, MessengerError> {
        let verified = self.processor.verify_vaa(vaa_bytes)?;
        let authorized = self.processor.authorize(verified)?;
        let key = authorized.key();

        let refused = match MessengerPayload::decode(authorized.payload()) {
            Ok(MessengerPayload::Hello { .. }) => None,
            Ok(other) => Some(InvalidMessage::NotHello {
                payload_id: other.id(),
            }),
            Err(e) => Some(InvalidMessage::Malformed(e)),
        };
        if let Some(reason) = refused {
            MESSAGES_REJECTED
                .with_label_values(&[RejectReason::InvalidPayload.as_str()])
                .inc();
            warn!("[gm-06] Refusing {}: {}", key, reason);
            return Err(MessengerError::InvalidMessage { key, reason });
        }

        Ok(self.processor.commit(authorized)?)
    }

    /// Trust `address` as the messenger on `chain`. Owner only.
    pub fn register_emitter(
        &self,
        caller: &OwnerCredential,
        chain: ChainId,
        address: UniversalAddress,
    ) -> Result<Option<ForeignEmitter>, MessengerError> {
        Ok(self
            .processor
            .registry()
            .register(caller, chain, address)
            .map_err(ProcessorError::from)?)
    }

    /// Stored record of a received message.
    pub fn received(&self, key: &MessageKey) -> Result<Option<DeliveryRecord>, MessengerError> {
        Ok(self.processor.delivery(key)?)
    }

    fn publish(&self, payload: &MessengerPayload) -> Result<ReadyMessage, MessengerError> {
        let bytes = payload.encode()?;
        Ok(self
            .processor
            .send(bytes, self.nonce, self.consistency_level)?)
    }
}
