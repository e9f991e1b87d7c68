//! # Inbound Ports
//!
//! API trait defining what the Attestation Verifier can do.

use gm_01_envelope_codec::Envelope;

use crate::domain::entities::{Attestation, VerifiedAttestation};
use crate::domain::errors::VerificationError;

/// Attestation verifier API - inbound port.
///
/// Implementations are pure with respect to ledger state and may be called
/// from any number of threads at once.
pub trait AttestationVerifierApi: Send + Sync {
    /// Verify `attestation` over `envelope`.
    fn verify(
        &self,
        envelope: &Envelope,
        attestation: &Attestation,
    ) -> Result<VerifiedAttestation, VerificationError>;
}
