//! # Domain Entities

use std::fmt;

use gm_01_envelope_codec::Envelope;
use gm_04_attestation_verifier::VerifiedAttestation;
use shared_types::{Hash, MessageKey, Timestamp};

// =============================================================================
// OUTBOUND
// =============================================================================

/// Outbound path states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutboundState {
    /// Payload, nonce and consistency level accepted.
    Compose,
    /// Sequence issued by the ledger.
    AllocateSequence,
    /// Canonical bytes and digest computed.
    EncodeEnvelope,
    /// Terminal: handed to the transport boundary.
    Ready,
}

impl OutboundState {
    /// Following state, `None` once `Ready`.
    pub fn next(self) -> Option<Self> {
        match self {
            OutboundState::Compose => Some(OutboundState::AllocateSequence),
            OutboundState::AllocateSequence => Some(OutboundState::EncodeEnvelope),
            OutboundState::EncodeEnvelope => Some(OutboundState::Ready),
            OutboundState::Ready => None,
        }
    }
}

/// An envelope ready for transmission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadyMessage {
    /// The composed envelope.
    pub envelope: Envelope,
    /// Canonical encoding.
    pub bytes: Vec<u8>,
    /// Digest guardians sign.
    pub digest: Hash,
}

impl ReadyMessage {
    /// Delivery key the message will be redeemed under.
    pub fn key(&self) -> MessageKey {
        self.envelope.message_key()
    }
}

/// Reference to a submitted envelope on the originating chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionRef(pub Hash);

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// Why an inbound message was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Envelope or VAA bytes were malformed or non-canonical.
    Decode,
    /// Attested digest does not match the envelope.
    DigestMismatch,
    /// Guardian set unknown or expired.
    UnknownSignerSet,
    /// A signature failed to verify.
    InvalidSignature,
    /// A signer index repeated.
    DuplicateSigner,
    /// A signer index exceeded the set size.
    OutOfRangeSigner,
    /// Too few valid signatures.
    QuorumNotMet,
    /// Emitter is not the registered emitter for its chain.
    UnauthorizedEmitter,
    /// Already delivered.
    Replay,
    /// The application refused the payload.
    InvalidPayload,
}

impl RejectReason {
    /// Stable label for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Decode => "decode",
            RejectReason::DigestMismatch => "digest_mismatch",
            RejectReason::UnknownSignerSet => "unknown_signer_set",
            RejectReason::InvalidSignature => "invalid_signature",
            RejectReason::DuplicateSigner => "duplicate_signer",
            RejectReason::OutOfRangeSigner => "out_of_range_signer",
            RejectReason::QuorumNotMet => "quorum_not_met",
            RejectReason::UnauthorizedEmitter => "unauthorized_emitter",
            RejectReason::Replay => "replay",
            RejectReason::InvalidPayload => "invalid_payload",
        }
    }

    /// Whether callers should treat the rejection as a successful no-op.
    pub fn is_benign(&self) -> bool {
        matches!(self, RejectReason::Replay)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound path states for one `(envelope, attestation)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InboundState {
    /// Bytes decoded.
    Received,
    /// Attestation verified.
    Verified,
    /// Emitter matches the registry.
    Authorized,
    /// Terminal success: payload handed over exactly once.
    Delivered,
    /// Terminal failure.
    Rejected(RejectReason),
}

impl InboundState {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InboundState::Delivered | InboundState::Rejected(_))
    }
}

/// A message handed to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Delivery key.
    pub key: MessageKey,
    /// Application payload.
    pub payload: Vec<u8>,
    /// Attested digest.
    pub digest: Hash,
    /// Envelope nonce.
    pub nonce: u32,
    /// When the delivery was recorded.
    pub redeemed_at: Timestamp,
}

/// Non-error results of inbound processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundOutcome {
    /// First redemption. The sink has received the payload.
    Delivered(Delivery),
    /// The key was already redeemed. Nothing changed.
    AlreadyDelivered(MessageKey),
}

impl InboundOutcome {
    /// Terminal state reached.
    pub fn state(&self) -> InboundState {
        match self {
            InboundOutcome::Delivered(_) => InboundState::Delivered,
            InboundOutcome::AlreadyDelivered(_) => InboundState::Rejected(RejectReason::Replay),
        }
    }

    /// Delivery key.
    pub fn key(&self) -> MessageKey {
        match self {
            InboundOutcome::Delivered(delivery) => delivery.key,
            InboundOutcome::AlreadyDelivered(key) => *key,
        }
    }

    /// Whether this call delivered the payload.
    pub fn is_delivered(&self) -> bool {
        matches!(self, InboundOutcome::Delivered(_))
    }
}

/// Proof of a passed attestation check. Only `MessageProcessor::verify`
/// creates one.
#[derive(Clone, Debug)]
pub struct VerifiedMessage {
    pub(crate) envelope: Envelope,
    pub(crate) attestation: VerifiedAttestation,
}

impl VerifiedMessage {
    /// Verified envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Verification summary.
    pub fn attestation(&self) -> &VerifiedAttestation {
        &self.attestation
    }

    /// Delivery key.
    pub fn key(&self) -> MessageKey {
        self.envelope.message_key()
    }
}

/// Proof of a verified attestation from the registered emitter. Only
/// `MessageProcessor::authorize` creates one.
#[derive(Clone, Debug)]
pub struct AuthorizedMessage {
    pub(crate) envelope: Envelope,
    pub(crate) attestation: VerifiedAttestation,
}

impl AuthorizedMessage {
    /// Authorized envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Payload awaiting commit.
    pub fn payload(&self) -> &[u8] {
        &self.envelope.payload
    }

    /// Verification summary.
    pub fn attestation(&self) -> &VerifiedAttestation {
        &self.attestation
    }

    /// Delivery key.
    pub fn key(&self) -> MessageKey {
        self.envelope.message_key()
    }
}
