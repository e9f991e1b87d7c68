//! # Digest Substitution
//!
//! Pair a valid attestation with bytes it was not produced for, or find a
//! second encoding of an attested envelope that decodes to something the
//! guardians never saw.
//!
//! ## Expected Defense
//!
//! - The digest is always recomputed from the envelope being delivered
//! - Signatures bind the digest, not the attestation's claimed digest
//! - Exactly one byte string decodes to a given envelope

#[cfg(test)]
mod tests {
    use gm_01_envelope_codec::{digest, encode, Envelope, EnvelopeError};
    use gm_04_attestation_verifier::{Attestation, SignedVaa, VaaError, VerificationError};
    use gm_05_delivery_ledger::DeliveryLedgerApi;
    use gm_06_message_processor::{ProcessorError, RejectReason};
    use shared_types::{ChainId, EmitterKey, UniversalAddress};

    use crate::fixtures::Network;

    /// Offset of the emitter address inside an encoded envelope.
    const ADDRESS_OFFSET: usize = 11;
    /// Offset of the sequence inside an encoded envelope.
    const SEQUENCE_OFFSET: usize = ADDRESS_OFFSET + 32;

    fn envelope_start(vaa: &[u8], envelope: &Envelope) -> usize {
        vaa.len() - encode(envelope).unwrap().len()
    }

    #[test]
    fn test_attestation_of_a_paired_with_envelope_b() {
        let network = Network::new();
        let a = network.inbound(1, b"send 1 USDC");
        let b = network.inbound(1, b"send 1000000 USDC");
        let attestation = network.attest(&a, 19);

        let err = network
            .processor
            .receive(&encode(&b).unwrap(), &attestation)
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::DigestMismatch {
                attested: digest(&a).unwrap(),
                computed: digest(&b).unwrap(),
            })
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::DigestMismatch));
        assert_eq!(network.deliveries.len().unwrap(), 0);
    }

    #[test]
    fn test_claimed_digest_rewritten_to_match() {
        let network = Network::new();
        let a = network.inbound(1, b"send 1 USDC");
        let b = network.inbound(1, b"send 1000000 USDC");

        // Honest digest for B, signatures still over A.
        let forged = Attestation {
            digest: digest(&b).unwrap(),
            ..network.attest(&a, 19)
        };

        let err = network
            .processor
            .receive(&encode(&b).unwrap(), &forged)
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 0 })
        );
    }

    #[test]
    fn test_vaa_body_swapped_under_signatures() {
        let network = Network::new();
        let a = network.inbound(1, b"send 1 USDC");
        let b = network.inbound(1, b"send 1000000 USDC");
        let signatures = network.attest(&a, 13).signatures;

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, b).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 0 })
        );
    }

    #[test]
    fn test_dirty_padding_on_an_evm_emitter() {
        let network = Network::new();
        let envelope = Envelope::builder(EmitterKey::new(
            ChainId::ETHEREUM,
            UniversalAddress::from_evm([0x11; 20]),
        ))
        .sequence(1)
        .payload(b"padded".to_vec())
        .build();

        let mut bytes = network.vaa(envelope.clone(), 13);
        let start = envelope_start(&bytes, &envelope);
        bytes[start + ADDRESS_OFFSET] = 0x01;

        let err = network.processor.receive_vaa(&bytes).unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Vaa(VaaError::Envelope(EnvelopeError::NonCanonicalAddress {
                chain: ChainId::ETHEREUM,
            }))
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::Decode));
    }

    #[test]
    fn test_trailing_bytes_after_payload() {
        let network = Network::new();
        let mut bytes = network.vaa(network.inbound(1, b"exact"), 13);
        bytes.extend_from_slice(b"!!");

        assert_eq!(
            network.processor.receive_vaa(&bytes).unwrap_err(),
            ProcessorError::Vaa(VaaError::Envelope(EnvelopeError::TrailingBytes(2)))
        );
        assert_eq!(network.deliveries.len().unwrap(), 0);
    }

    #[test]
    fn test_zero_sequence_never_decodes() {
        let network = Network::new();
        let envelope = network.inbound(1, b"sequence zero");
        let mut bytes = encode(&envelope).unwrap();
        bytes[SEQUENCE_OFFSET..SEQUENCE_OFFSET + 8].fill(0);

        assert_eq!(
            network
                .processor
                .receive(&bytes, &network.attest(&envelope, 13))
                .unwrap_err(),
            ProcessorError::Envelope(EnvelopeError::ZeroSequence)
        );
    }
}
