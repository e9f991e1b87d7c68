//! In-process guardian network.
//!
//! Holds secp256k1 signing keys for every guardian and produces recoverable,
//! low-S signatures in the same `r || s || v` layout the verifier consumes.
//! Used on devnets, in tests and in benchmarks. Never in production.

use k256::ecdsa::SigningKey;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_types::{Address, Hash, Timestamp};

use crate::domain::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use crate::domain::entities::{Attestation, GuardianSet, GuardianSignature, SIGNATURE_LENGTH};
use crate::domain::errors::SignatureError;

/// A set of guardian signing keys.
pub struct DevnetGuardians {
    keys: Vec<SigningKey>,
}

impl DevnetGuardians {
    /// `count` guardians with fresh random keys.
    pub fn random(count: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            keys: (0..count).map(|_| SigningKey::random(&mut rng)).collect(),
        }
    }

    /// `count` guardians derived deterministically from `seed`.
    pub fn from_seed(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            keys: (0..count).map(|_| SigningKey::random(&mut rng)).collect(),
        }
    }

    /// Number of guardians.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no guardians.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Guardian addresses in index order.
    pub fn addresses(&self) -> Vec<Address> {
        self.keys
            .iter()
            .map(|key| address_from_pubkey(key.verifying_key()))
            .collect()
    }

    /// Guardian set describing these guardians.
    pub fn guardian_set(&self, index: u32, creation_time: Timestamp) -> GuardianSet {
        GuardianSet::new(index, self.addresses(), creation_time)
    }

    /// Signature of guardian `index` over `digest`.
    pub fn sign(&self, digest: &Hash, index: u8) -> Result<GuardianSignature, SignatureError> {
        let key = self
            .keys
            .get(index as usize)
            .ok_or(SignatureError::SigningFailed)?;

        let (sig, recid) = key
            .sign_prehash_recoverable(digest)
            .map_err(|_| SignatureError::SigningFailed)?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        // Normalizing S mirrors the point, which flips the recovery parity.
        let mut v = recid.to_byte() & 1;
        if !is_low_s(&s) {
            s = invert_s(&s);
            v ^= 1;
        }

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature[..32].copy_from_slice(&r);
        signature[32..64].copy_from_slice(&s);
        signature[64] = v;

        Ok(GuardianSignature { index, signature })
    }

    /// Signatures from the guardians at `indices`, in that order.
    pub fn sign_with(
        &self,
        digest: &Hash,
        indices: &[u8],
    ) -> Result<Vec<GuardianSignature>, SignatureError> {
        indices.iter().map(|&i| self.sign(digest, i)).collect()
    }

    /// Attestation signed by the first `signers` guardians.
    pub fn attest(
        &self,
        digest: Hash,
        guardian_set_index: u32,
        signers: usize,
    ) -> Result<Attestation, SignatureError> {
        let count = signers.min(self.keys.len()).min(u8::MAX as usize + 1);
        let indices: Vec<u8> = (0..count).map(|i| i as u8).collect();
        Ok(Attestation {
            digest,
            guardian_set_index,
            signatures: self.sign_with(&digest, &indices)?,
        })
    }
}

impl std::fmt::Debug for DevnetGuardians {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevnetGuardians")
            .field("guardians", &self.keys.len())
            .finish()
    }
}
