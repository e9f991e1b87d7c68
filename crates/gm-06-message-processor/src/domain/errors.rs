//! # Domain Errors

use gm_01_envelope_codec::{EnvelopeError, PayloadError};
use gm_02_sequence_ledger::SequenceError;
use gm_03_emitter_registry::RegistryError;
use gm_04_attestation_verifier::{SignatureError, VaaError, VerificationError};
use gm_05_delivery_ledger::DeliveryError;
use shared_types::{EmitterKey, MessageKey, UniversalAddress};
use thiserror::Error;

use super::entities::RejectReason;

/// Message processor failures.
///
/// Rejections of an inbound message map to a `RejectReason`; storage and
/// ledger failures do not.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessorError {
    /// Envelope bytes are malformed, or an outbound envelope is invalid.
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Signed VAA framing is malformed.
    #[error("VAA error: {0}")]
    Vaa(#[from] VaaError),

    /// The attestation was rejected.
    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// The emitter is not the registered emitter for its chain.
    #[error("Unauthorized emitter {emitter} (registered: {})", .registered.map(|a| a.to_string()).unwrap_or_else(|| "none".into()))]
    UnauthorizedEmitter {
        /// Claimed emitter
        emitter: EmitterKey,
        /// Address registered for the chain, if any
        registered: Option<UniversalAddress>,
    },

    /// The local clock does not fit the envelope's `u32` timestamp.
    #[error("Clock reading {now} does not fit an envelope timestamp")]
    TimestampOutOfRange {
        /// Seconds since the Unix epoch
        now: u64,
    },

    /// Sequence issuance failed.
    #[error("Sequence ledger error: {0}")]
    Sequence(#[from] SequenceError),

    /// Registry storage failed.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Delivery ledger storage failed.
    #[error("Delivery ledger error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ProcessorError {
    /// Rejection reason for the inbound state machine.
    ///
    /// `None` for infrastructure failures that say nothing about the message.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            ProcessorError::Envelope(_) | ProcessorError::Vaa(_) => Some(RejectReason::Decode),
            ProcessorError::Verification(e) => Some(match e {
                VerificationError::DigestMismatch { .. } => RejectReason::DigestMismatch,
                VerificationError::UnknownSignerSet { .. } => RejectReason::UnknownSignerSet,
                VerificationError::InvalidSignature { .. } => RejectReason::InvalidSignature,
                VerificationError::DuplicateSigner { .. } => RejectReason::DuplicateSigner,
                VerificationError::OutOfRangeSigner { .. } => RejectReason::OutOfRangeSigner,
                VerificationError::QuorumNotMet { .. } => RejectReason::QuorumNotMet,
                VerificationError::Envelope(_) => RejectReason::Decode,
            }),
            ProcessorError::UnauthorizedEmitter { .. } => Some(RejectReason::UnauthorizedEmitter),
            ProcessorError::TimestampOutOfRange { .. }
            | ProcessorError::Sequence(_)
            | ProcessorError::Registry(_)
            | ProcessorError::Delivery(_) => None,
        }
    }
}

/// Why the messenger refused a payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidMessage {
    /// Payload bytes do not decode.
    #[error("malformed payload: {0}")]
    Malformed(#[from] PayloadError),

    /// Payload decoded but is not a `Hello`.
    #[error("expected Hello, got payload id {payload_id}")]
    NotHello {
        /// Payload id received
        payload_id: u8,
    },
}

/// Messenger application errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessengerError {
    /// The processor rejected or failed the message.
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    /// The payload is not an acceptable messenger message.
    #[error("Invalid message {key}: {reason}")]
    InvalidMessage {
        /// Delivery key of the refused message
        key: MessageKey,
        /// What was wrong
        reason: InvalidMessage,
    },

    /// An outbound message could not be encoded.
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}

impl MessengerError {
    /// Rejection reason for the inbound state machine.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            MessengerError::Processor(e) => e.reject_reason(),
            MessengerError::InvalidMessage { .. } => Some(RejectReason::InvalidPayload),
            MessengerError::Payload(_) => None,
        }
    }
}

/// Attestation oracle failures. "Not yet attested" is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle could not be reached.
    #[error("Attestation oracle unavailable: {0}")]
    Unavailable(String),

    /// A guardian failed to sign.
    #[error("Guardian signing failed: {0}")]
    Signing(#[from] SignatureError),

    /// The oracle returned an unusable VAA.
    #[error("Oracle returned a bad VAA: {0}")]
    Vaa(#[from] VaaError),
}

/// Transport failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The chain refused the submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Submitted bytes are not a valid envelope.
    #[error("Invalid envelope: {0}")]
    Envelope(#[from] EnvelopeError),
}
