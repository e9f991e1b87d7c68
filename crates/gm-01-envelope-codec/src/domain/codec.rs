//! # Canonical Codec
//!
//! `encode`/`decode` are exact inverses over the set of valid envelopes.
//! Anything outside that set (wrong version, dirty padding, zero sequence,
//! length disagreement) is rejected by both directions.

use sha3::{Digest, Keccak256};
use shared_types::{ChainId, Hash, UniversalAddress};

use super::entities::Envelope;
use super::errors::EnvelopeError;

/// The only version tag this codec emits or accepts.
pub const ENVELOPE_VERSION: u8 = 1;

/// Size of the fixed header preceding the payload.
pub const HEADER_LEN: usize = 1 + 4 + 4 + 2 + 32 + 8 + 1 + 4;

/// Largest payload accepted (64 KiB).
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest of already-encoded envelope bytes: `keccak256(keccak256(bytes))`.
pub fn digest_bytes(encoded: &[u8]) -> Hash {
    keccak256(&keccak256(encoded))
}

/// Encode an envelope into its canonical layout.
///
/// Fails on envelopes `decode` would reject, so every emitted byte string
/// round-trips.
pub fn encode(envelope: &Envelope) -> Result<Vec<u8>, EnvelopeError> {
    validate(envelope)?;

    let mut out = Vec::with_capacity(HEADER_LEN + envelope.payload.len());
    out.push(ENVELOPE_VERSION);
    out.extend_from_slice(&envelope.timestamp.to_be_bytes());
    out.extend_from_slice(&envelope.nonce.to_be_bytes());
    out.extend_from_slice(&envelope.emitter_chain.as_u16().to_be_bytes());
    out.extend_from_slice(envelope.emitter_address.as_bytes());
    out.extend_from_slice(&envelope.sequence.to_be_bytes());
    out.push(envelope.consistency_level);
    out.extend_from_slice(&(envelope.payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&envelope.payload);
    Ok(out)
}

/// Digest of an envelope's canonical encoding.
pub fn digest(envelope: &Envelope) -> Result<Hash, EnvelopeError> {
    Ok(digest_bytes(&encode(envelope)?))
}

/// Decode canonical bytes into an envelope.
pub fn decode(bytes: &[u8]) -> Result<Envelope, EnvelopeError> {
    let mut reader = Reader::new(bytes);

    let version = reader.u8()?;
    if version != ENVELOPE_VERSION {
        return Err(EnvelopeError::UnsupportedVersion(version));
    }

    // The header is fixed-width; report the full shortfall up front.
    if bytes.len() < HEADER_LEN {
        return Err(EnvelopeError::Truncated {
            needed: HEADER_LEN,
            available: bytes.len(),
        });
    }

    let timestamp = reader.u32()?;
    let nonce = reader.u32()?;
    let emitter_chain = ChainId(reader.u16()?);
    let emitter_address = UniversalAddress(reader.array::<32>()?);
    let sequence = reader.u64()?;
    let consistency_level = reader.u8()?;
    let payload_len = reader.u32()? as usize;

    if !emitter_address.is_canonical_for(emitter_chain) {
        return Err(EnvelopeError::NonCanonicalAddress {
            chain: emitter_chain,
        });
    }
    if sequence == 0 {
        return Err(EnvelopeError::ZeroSequence);
    }
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(EnvelopeError::PayloadTooLarge {
            len: payload_len,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let payload = reader.take(payload_len)?.to_vec();
    let remaining = reader.remaining();
    if remaining > 0 {
        return Err(EnvelopeError::TrailingBytes(remaining));
    }

    Ok(Envelope {
        timestamp,
        nonce,
        emitter_chain,
        emitter_address,
        sequence,
        consistency_level,
        payload,
    })
}

fn validate(envelope: &Envelope) -> Result<(), EnvelopeError> {
    if !envelope
        .emitter_address
        .is_canonical_for(envelope.emitter_chain)
    {
        return Err(EnvelopeError::NonCanonicalAddress {
            chain: envelope.emitter_chain,
        });
    }
    if envelope.sequence == 0 {
        return Err(EnvelopeError::ZeroSequence);
    }
    if envelope.payload.len() > MAX_PAYLOAD_SIZE {
        return Err(EnvelopeError::PayloadTooLarge {
            len: envelope.payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(())
}

/// Bounds-checked big-endian cursor.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EnvelopeError> {
        let end = self.pos.saturating_add(n);
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(EnvelopeError::Truncated {
                needed: end,
                available: self.bytes.len(),
            })?;
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], EnvelopeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, EnvelopeError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, EnvelopeError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, EnvelopeError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, EnvelopeError> {
        Ok(u64::from_be_bytes(self.array()?))
    }
}
