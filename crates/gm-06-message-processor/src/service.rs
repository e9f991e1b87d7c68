//! # Message Processor Service
//!
//! Drives both state machines over injected ports. Every inbound rejection
//! is logged and counted with its reason at the stage that produced it.

use std::sync::Arc;

use gm_01_envelope_codec::{
    decode, digest_bytes, encode, Envelope, EnvelopeError, MAX_PAYLOAD_SIZE,
};
use gm_02_sequence_ledger::SequenceLedgerApi;
use gm_03_emitter_registry::{EmitterRegistryApi, RegistryError};
use gm_04_attestation_verifier::{
    Attestation, AttestationVerifier, AttestationVerifierApi, ExpiryPolicy, GuardianSetResolver,
    SignedVaa,
};
use gm_05_delivery_ledger::{DeliveryLedgerApi, DeliveryRecord, RecordOutcome};
use gm_telemetry::{
    HistogramTimer, MESSAGES_DELIVERED, MESSAGES_REJECTED, MESSAGES_SENT, REPLAYS,
    SIGNATURE_VERIFICATIONS, VERIFICATION_DURATION,
};
use shared_types::{EmitterKey, MessageKey, TimeSource};
use tracing::{debug, error, info, warn};

use crate::domain::{
    AuthorizedMessage, Delivery, InboundOutcome, InboundState, OutboundState, ProcessorError,
    ReadyMessage, RejectReason, VerifiedMessage,
};
use crate::ports::DeliverySink;

/// Everything the processor depends on.
#[derive(Clone)]
pub struct ProcessorPorts {
    /// Outbound sequence counters.
    pub sequences: Arc<dyn SequenceLedgerApi>,
    /// Trusted foreign emitters.
    pub registry: Arc<dyn EmitterRegistryApi>,
    /// Guardian sets by index.
    pub guardian_sets: Arc<dyn GuardianSetResolver>,
    /// Replay guard.
    pub deliveries: Arc<dyn DeliveryLedgerApi>,
    /// Wall clock.
    pub clock: Arc<dyn TimeSource>,
    /// Application receiving payloads.
    pub sink: Arc<dyn DeliverySink>,
}

/// Message processor.
pub struct MessageProcessor {
    local_emitter: EmitterKey,
    sequences: Arc<dyn SequenceLedgerApi>,
    registry: Arc<dyn EmitterRegistryApi>,
    verifier: AttestationVerifier<Arc<dyn GuardianSetResolver>>,
    deliveries: Arc<dyn DeliveryLedgerApi>,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn DeliverySink>,
}

impl MessageProcessor {
    /// Create a processor emitting as `local_emitter`.
    pub fn new(local_emitter: EmitterKey, policy: ExpiryPolicy, ports: ProcessorPorts) -> Self {
        let verifier =
            AttestationVerifier::new(ports.guardian_sets, Arc::clone(&ports.clock), policy);
        Self {
            local_emitter,
            sequences: ports.sequences,
            registry: ports.registry,
            verifier,
            deliveries: ports.deliveries,
            clock: ports.clock,
            sink: ports.sink,
        }
    }

    /// Emitter identity of outbound messages.
    pub fn local_emitter(&self) -> EmitterKey {
        self.local_emitter
    }

    /// Trusted emitter registry.
    pub fn registry(&self) -> &dyn EmitterRegistryApi {
        self.registry.as_ref()
    }

    /// Expiry policy applied to rotated guardian sets.
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        self.verifier.policy()
    }

    /// Last sequence issued for the local emitter.
    pub fn current_sequence(&self) -> Result<u64, ProcessorError> {
        Ok(self.sequences.current(&self.local_emitter)?)
    }

    /// Stored delivery record for `key`.
    pub fn delivery(&self, key: &MessageKey) -> Result<Option<DeliveryRecord>, ProcessorError> {
        Ok(self.deliveries.get(key)?)
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Compose, sequence and encode an outbound message.
    ///
    /// Payload limits and the clock are checked before a sequence is
    /// allocated, so a refused message never consumes a sequence number.
    pub fn send(
        &self,
        payload: Vec<u8>,
        nonce: u32,
        consistency_level: u8,
    ) -> Result<ReadyMessage, ProcessorError> {
        let emitter = self.local_emitter;
        debug!("[gm-06] {:?} {} nonce={}", OutboundState::Compose, emitter, nonce);
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(EnvelopeError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            }
            .into());
        }
        let now = self.clock.now();
        let timestamp = u32::try_from(now).map_err(|_| {
            error!("[gm-06] Clock reading {} exceeds the envelope timestamp range", now);
            ProcessorError::TimestampOutOfRange { now }
        })?;

        let sequence = self.sequences.next(&emitter).map_err(|e| {
            error!("[gm-06] Sequence allocation failed for {}: {}", emitter, e);
            ProcessorError::from(e)
        })?;
        debug!("[gm-06] {:?} {} -> {}", OutboundState::AllocateSequence, emitter, sequence);

        let envelope = Envelope::builder(emitter)
            .timestamp(timestamp)
            .nonce(nonce)
            .sequence(sequence)
            .consistency_level(consistency_level)
            .payload(payload)
            .build();
        let bytes = encode(&envelope)?;
        let digest = digest_bytes(&bytes);
        debug!(
            "[gm-06] {:?} {} ({} bytes)",
            OutboundState::EncodeEnvelope,
            envelope.message_key(),
            bytes.len()
        );

        MESSAGES_SENT.inc();
        info!(
            "[gm-06] {:?}: {} digest=0x{}",
            OutboundState::Ready,
            envelope.message_key(),
            hex::encode(digest)
        );

        Ok(ReadyMessage {
            envelope,
            bytes,
            digest,
        })
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Run the full inbound path on raw envelope bytes.
    pub fn receive(
        &self,
        envelope_bytes: &[u8],
        attestation: &Attestation,
    ) -> Result<InboundOutcome, ProcessorError> {
        let envelope = decode(envelope_bytes).map_err(|e| self.rejected(None, e.into()))?;
        let verified = self.verify(envelope, attestation)?;
        let authorized = self.authorize(verified)?;
        self.commit(authorized)
    }

    /// Run the full inbound path on a signed VAA.
    pub fn receive_vaa(&self, vaa_bytes: &[u8]) -> Result<InboundOutcome, ProcessorError> {
        let verified = self.verify_vaa(vaa_bytes)?;
        let authorized = self.authorize(verified)?;
        self.commit(authorized)
    }

    /// `Received -> Verified` for a signed VAA.
    pub fn verify_vaa(&self, vaa_bytes: &[u8]) -> Result<VerifiedMessage, ProcessorError> {
        let vaa = SignedVaa::parse(vaa_bytes).map_err(|e| self.rejected(None, e.into()))?;
        let attestation = vaa.attestation();
        self.verify(vaa.into_envelope(), &attestation)
    }

    /// `Received -> Verified`.
    pub fn verify(
        &self,
        envelope: Envelope,
        attestation: &Attestation,
    ) -> Result<VerifiedMessage, ProcessorError> {
        let key = envelope.message_key();
        debug!("[gm-06] {:?} {}", InboundState::Received, key);

        let result = {
            let _timer = HistogramTimer::new(&VERIFICATION_DURATION);
            self.verifier.verify(&envelope, attestation)
        };

        match result {
            Ok(verified) => {
                SIGNATURE_VERIFICATIONS.with_label_values(&["valid"]).inc();
                debug!(
                    "[gm-06] {:?} {} ({}/{} signatures, set {})",
                    InboundState::Verified,
                    key,
                    verified.valid_signatures,
                    verified.quorum,
                    verified.guardian_set_index
                );
                Ok(VerifiedMessage {
                    envelope,
                    attestation: verified,
                })
            }
            Err(e) => {
                SIGNATURE_VERIFICATIONS.with_label_values(&[e.kind()]).inc();
                Err(self.rejected(Some(key), e.into()))
            }
        }
    }

    /// `Verified -> Authorized`: the emitter must be the one registered for
    /// its chain.
    pub fn authorize(&self, verified: VerifiedMessage) -> Result<AuthorizedMessage, ProcessorError> {
        let key = verified.key();
        let emitter = verified.envelope.emitter();

        let registered = match self.registry.lookup(emitter.chain) {
            Ok(address) => Some(address),
            Err(RegistryError::NotRegistered { .. }) => None,
            Err(e) => return Err(self.rejected(Some(key), e.into())),
        };

        if registered != Some(emitter.address) {
            return Err(self.rejected(
                Some(key),
                ProcessorError::UnauthorizedEmitter {
                    emitter,
                    registered,
                },
            ));
        }

        debug!("[gm-06] {:?} {}", InboundState::Authorized, key);
        Ok(AuthorizedMessage {
            envelope: verified.envelope,
            attestation: verified.attestation,
        })
    }

    /// `Authorized -> Delivered`, or `Rejected(Replay)` reported as
    /// `InboundOutcome::AlreadyDelivered`.
    pub fn commit(&self, authorized: AuthorizedMessage) -> Result<InboundOutcome, ProcessorError> {
        let key = authorized.key();
        let AuthorizedMessage {
            envelope,
            attestation,
        } = authorized;
        let redeemed_at = self.clock.now();

        let record = DeliveryRecord {
            payload: envelope.payload.clone(),
            digest: attestation.digest,
            nonce: envelope.nonce,
            redeemed_at,
        };

        let outcome = self
            .deliveries
            .record_if_absent(key, record)
            .map_err(|e| self.rejected(Some(key), e.into()))?;

        match outcome {
            RecordOutcome::AlreadyDelivered => {
                REPLAYS.inc();
                MESSAGES_REJECTED
                    .with_label_values(&[RejectReason::Replay.as_str()])
                    .inc();
                info!("[gm-06] {:?} {}", InboundState::Rejected(RejectReason::Replay), key);
                Ok(InboundOutcome::AlreadyDelivered(key))
            }
            RecordOutcome::Inserted => {
                let delivery = Delivery {
                    key,
                    payload: envelope.payload,
                    digest: attestation.digest,
                    nonce: envelope.nonce,
                    redeemed_at,
                };
                self.sink.deliver(&delivery);
                MESSAGES_DELIVERED.inc();
                info!(
                    "[gm-06] {:?} {} ({} bytes)",
                    InboundState::Delivered,
                    key,
                    delivery.payload.len()
                );
                Ok(InboundOutcome::Delivered(delivery))
            }
        }
    }

    fn rejected(&self, key: Option<MessageKey>, error: ProcessorError) -> ProcessorError {
        let subject = key.map(|k| k.to_string()).unwrap_or_else(|| "<undecoded>".into());
        match error.reject_reason() {
            Some(reason) => {
                MESSAGES_REJECTED.with_label_values(&[reason.as_str()]).inc();
                warn!(
                    "[gm-06] {:?} {}: {}",
                    InboundState::Rejected(reason),
                    subject,
                    error
                );
            }
            None => error!("[gm-06] Inbound processing of {} failed: {}", subject, error),
        }
        error
    }
}
