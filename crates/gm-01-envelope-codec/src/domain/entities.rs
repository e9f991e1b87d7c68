//! # Domain Entities
//!
//! The envelope: one outbound unit of cross-chain communication.

use serde::{Deserialize, Serialize};
use shared_types::{ChainId, EmitterKey, MessageKey, UniversalAddress};

/// One cross-chain message plus its routing metadata.
///
/// `(emitter_chain, emitter_address, sequence)` is the delivery primary key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Composition time in seconds. Used by the guardian-set expiry policy.
    pub timestamp: u32,
    /// Application-supplied nonce. Not used for ordering.
    pub nonce: u32,
    /// Chain of origin.
    pub emitter_chain: ChainId,
    /// Universal address of the sender.
    pub emitter_address: UniversalAddress,
    /// Per-emitter sequence, starting at 1.
    pub sequence: u64,
    /// Finality required on the source chain before attestation.
    pub consistency_level: u8,
    /// Opaque application payload.
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Start building an envelope for `emitter`.
    pub fn builder(emitter: EmitterKey) -> EnvelopeBuilder {
        EnvelopeBuilder::new(emitter)
    }

    /// Identity of the sender.
    pub fn emitter(&self) -> EmitterKey {
        EmitterKey::new(self.emitter_chain, self.emitter_address)
    }

    /// Delivery ledger key.
    pub fn message_key(&self) -> MessageKey {
        MessageKey::new(self.emitter(), self.sequence)
    }
}

/// Builder for [`Envelope`].
#[derive(Clone, Debug)]
pub struct EnvelopeBuilder {
    envelope: Envelope,
}

impl EnvelopeBuilder {
    /// New builder with sequence 1 and empty payload.
    pub fn new(emitter: EmitterKey) -> Self {
        Self {
            envelope: Envelope {
                timestamp: 0,
                nonce: 0,
                emitter_chain: emitter.chain,
                emitter_address: emitter.address,
                sequence: 1,
                consistency_level: 0,
                payload: Vec::new(),
            },
        }
    }

    /// Set the composition timestamp.
    pub fn timestamp(mut self, timestamp: u32) -> Self {
        self.envelope.timestamp = timestamp;
        self
    }

    /// Set the application nonce.
    pub fn nonce(mut self, nonce: u32) -> Self {
        self.envelope.nonce = nonce;
        self
    }

    /// Set the sequence number.
    pub fn sequence(mut self, sequence: u64) -> Self {
        self.envelope.sequence = sequence;
        self
    }

    /// Set the consistency level.
    pub fn consistency_level(mut self, level: u8) -> Self {
        self.envelope.consistency_level = level;
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.envelope.payload = payload.into();
        self
    }

    /// Finish building.
    pub fn build(self) -> Envelope {
        self.envelope
    }
}
