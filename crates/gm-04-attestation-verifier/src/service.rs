//! # Attestation Verifier Service
//!
//! Implements `AttestationVerifierApi` over a guardian set resolver, a clock
//! and the configured expiry policy.

use std::sync::Arc;

use gm_01_envelope_codec::{digest, Envelope};
use shared_types::TimeSource;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::domain::entities::{Attestation, ExpiryPolicy, VerifiedAttestation};
use crate::domain::errors::VerificationError;
use crate::domain::verifier::verify_signatures;
use crate::ports::{AttestationVerifierApi, GuardianSetResolver};

/// Attestation verifier.
pub struct AttestationVerifier<R: GuardianSetResolver> {
    resolver: R,
    clock: Arc<dyn TimeSource>,
    policy: ExpiryPolicy,
}

impl<R: GuardianSetResolver> AttestationVerifier<R> {
    /// Create a verifier.
    pub fn new(resolver: R, clock: Arc<dyn TimeSource>, policy: ExpiryPolicy) -> Self {
        Self {
            resolver,
            clock,
            policy,
        }
    }

    /// Active expiry policy.
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Guardian set resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: GuardianSetResolver> AttestationVerifierApi for AttestationVerifier<R> {
    fn verify(
        &self,
        envelope: &Envelope,
        attestation: &Attestation,
    ) -> Result<VerifiedAttestation, VerificationError> {
        let computed = digest(envelope)?;
        if !bool::from(computed.ct_eq(&attestation.digest)) {
            warn!("[gm-04] Digest mismatch for {}", envelope.message_key());
            return Err(VerificationError::DigestMismatch {
                attested: attestation.digest,
                computed,
            });
        }

        let index = attestation.guardian_set_index;
        let set = self
            .resolver
            .guardian_set(index)
            .ok_or(VerificationError::UnknownSignerSet {
                index,
                expired_at: None,
            })?;

        let now = self.clock.now();
        if !self.policy.allows(&set, now, envelope.timestamp) {
            warn!(
                "[gm-04] Guardian set {} expired at {:?} (now {})",
                index, set.expiration_time, now
            );
            return Err(VerificationError::UnknownSignerSet {
                index,
                expired_at: set.expiration_time,
            });
        }

        let valid_signatures = verify_signatures(&computed, &attestation.signatures, &set)?;

        debug!(
            "[gm-04] Verified {} with {}/{} signatures (set {})",
            envelope.message_key(),
            valid_signatures,
            set.len(),
            index
        );

        Ok(VerifiedAttestation {
            digest: computed,
            guardian_set_index: index,
            valid_signatures,
            quorum: set.quorum(),
        })
    }
}
