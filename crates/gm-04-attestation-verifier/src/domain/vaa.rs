//! # Signed VAA Framing
//!
//! Transport framing that bundles guardian signatures with the envelope they
//! cover.
//!
//! ```text
//! version (1) | guardian_set_index (u32 BE) | count (1)
//!   | count x [signer index (1) | signature (65)]
//!   | envelope bytes
//! ```
//!
//! The digest is always recomputed from the embedded envelope bytes. Since
//! `decode` only accepts canonical encodings, those bytes are the unique
//! encoding of the decoded envelope.

use gm_01_envelope_codec::{decode, digest_bytes, encode, Envelope};

use super::entities::{Attestation, GuardianSignature, SIGNATURE_LENGTH};
use super::errors::VaaError;

/// Framing version.
pub const VAA_VERSION: u8 = 1;

const FRAME_HEADER_LEN: usize = 1 + 4 + 1;
const SIGNATURE_ENTRY_LEN: usize = 1 + SIGNATURE_LENGTH;

/// Envelope plus the guardian signatures over its digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedVaa {
    /// Guardian set the signatures belong to.
    pub guardian_set_index: u32,
    /// Guardian signatures.
    pub signatures: Vec<GuardianSignature>,
    envelope: Envelope,
    envelope_bytes: Vec<u8>,
}

impl SignedVaa {
    /// Bundle an envelope with signatures.
    pub fn new(
        guardian_set_index: u32,
        signatures: Vec<GuardianSignature>,
        envelope: Envelope,
    ) -> Result<Self, VaaError> {
        if signatures.len() > u8::MAX as usize {
            return Err(VaaError::TooManySignatures(signatures.len()));
        }
        let envelope_bytes = encode(&envelope)?;
        Ok(Self {
            guardian_set_index,
            signatures,
            envelope,
            envelope_bytes,
        })
    }

    /// Parse framed bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, VaaError> {
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(VaaError::Truncated {
                needed: FRAME_HEADER_LEN,
                available: bytes.len(),
            });
        }
        if bytes[0] != VAA_VERSION {
            return Err(VaaError::UnsupportedVersion(bytes[0]));
        }

        let mut gsi = [0u8; 4];
        gsi.copy_from_slice(&bytes[1..5]);
        let guardian_set_index = u32::from_be_bytes(gsi);
        let count = bytes[5] as usize;

        let body_start = FRAME_HEADER_LEN + count * SIGNATURE_ENTRY_LEN;
        if bytes.len() < body_start {
            return Err(VaaError::Truncated {
                needed: body_start,
                available: bytes.len(),
            });
        }

        let signatures = bytes[FRAME_HEADER_LEN..body_start]
            .chunks_exact(SIGNATURE_ENTRY_LEN)
            .map(|entry| {
                let mut signature = [0u8; SIGNATURE_LENGTH];
                signature.copy_from_slice(&entry[1..]);
                GuardianSignature {
                    index: entry[0],
                    signature,
                }
            })
            .collect();

        let envelope_bytes = bytes[body_start..].to_vec();
        let envelope = decode(&envelope_bytes)?;

        Ok(Self {
            guardian_set_index,
            signatures,
            envelope,
            envelope_bytes,
        })
    }

    /// Serialize to framed bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            FRAME_HEADER_LEN + self.signatures.len() * SIGNATURE_ENTRY_LEN + self.envelope_bytes.len(),
        );
        out.push(VAA_VERSION);
        out.extend_from_slice(&self.guardian_set_index.to_be_bytes());
        out.push(self.signatures.len() as u8);
        for sig in &self.signatures {
            out.push(sig.index);
            out.extend_from_slice(&sig.signature);
        }
        out.extend_from_slice(&self.envelope_bytes);
        out
    }

    /// Decoded envelope. Read-only: the framed bytes are fixed at
    /// construction.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Take the decoded envelope.
    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }

    /// Canonical bytes of the embedded envelope.
    pub fn envelope_bytes(&self) -> &[u8] {
        &self.envelope_bytes
    }

    /// Attestation with the digest computed from the embedded envelope.
    pub fn attestation(&self) -> Attestation {
        Attestation {
            digest: digest_bytes(&self.envelope_bytes),
            guardian_set_index: self.guardian_set_index,
            signatures: self.signatures.clone(),
        }
    }
}
