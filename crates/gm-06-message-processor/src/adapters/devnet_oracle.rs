//! Devnet attestation oracle.
//!
//! Plays the guardian network: envelopes it has observed are signed by the
//! configured number of guardians and served as signed VAA bytes.

use std::collections::HashMap;

use async_trait::async_trait;
use gm_01_envelope_codec::Envelope;
use gm_04_attestation_verifier::{DevnetGuardians, SignedVaa};
use parking_lot::Mutex;
use shared_types::MessageKey;
use tracing::debug;

use crate::domain::OracleError;
use crate::ports::AttestationOracle;

struct Observation {
    envelope: Envelope,
    polls: u32,
}

/// In-process guardian network.
pub struct DevnetAttestationOracle {
    guardians: DevnetGuardians,
    guardian_set_index: u32,
    signers: usize,
    confirmations: u32,
    observed: Mutex<HashMap<MessageKey, Observation>>,
}

impl DevnetAttestationOracle {
    /// Every guardian signs; attestations are available immediately.
    pub fn new(guardians: DevnetGuardians, guardian_set_index: u32) -> Self {
        let signers = guardians.len();
        Self {
            guardians,
            guardian_set_index,
            signers,
            confirmations: 0,
            observed: Mutex::new(HashMap::new()),
        }
    }

    /// Only the first `signers` guardians sign.
    pub fn with_signers(mut self, signers: usize) -> Self {
        self.signers = signers;
        self
    }

    /// Answer "not yet" to the first `polls` fetches of each message.
    pub fn with_confirmations(mut self, polls: u32) -> Self {
        self.confirmations = polls;
        self
    }

    /// Record an envelope emitted on the source chain.
    pub fn observe(&self, envelope: Envelope) {
        let key = envelope.message_key();
        debug!("[gm-06] Guardians observed {}", key);
        self.observed
            .lock()
            .entry(key)
            .or_insert(Observation { envelope, polls: 0 });
    }

    /// Number of observed envelopes.
    pub fn observed(&self) -> usize {
        self.observed.lock().len()
    }
}

#[async_trait]
impl AttestationOracle for DevnetAttestationOracle {
    async fn fetch(&self, key: &MessageKey) -> Result<Option<Vec<u8>>, OracleError> {
        let envelope = {
            let mut observed = self.observed.lock();
            let Some(observation) = observed.get_mut(key) else {
                return Ok(None);
            };
            if observation.polls < self.confirmations {
                observation.polls += 1;
                return Ok(None);
            }
            observation.envelope.clone()
        };

        let mut vaa = SignedVaa::new(self.guardian_set_index, Vec::new(), envelope)?;
        let signers = self.signers.min(u8::MAX as usize);
        vaa.signatures = self
            .guardians
            .attest(vaa.attestation().digest, self.guardian_set_index, signers)?
            .signatures;

        debug!(
            "[gm-06] {} attested by {} guardians",
            key,
            vaa.signatures.len()
        );
        Ok(Some(vaa.encode()))
    }
}

impl std::fmt::Debug for DevnetAttestationOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevnetAttestationOracle")
            .field("guardians", &self.guardians.len())
            .field("guardian_set_index", &self.guardian_set_index)
            .field("signers", &self.signers)
            .finish()
    }
}
