//! # Guardian Set Spoofing (Wormhole, February 2022)
//!
//! The attacker got a message accepted without the real guardians signing it
//! by feeding the verifier signer data it controlled. Here the equivalent
//! moves are: sign with attacker keys, point at a guardian set index that
//! does not exist, or pad a partial quorum with forged signatures.
//!
//! ## Expected Defense
//!
//! - Guardian sets are resolved only from the processor's own store
//! - Every signature must recover to the guardian at its claimed index
//! - Any invalid signature rejects the whole attestation

#[cfg(test)]
mod tests {
    use gm_01_envelope_codec::{digest, encode};
    use gm_04_attestation_verifier::{Attestation, DevnetGuardians, SignedVaa, VerificationError};
    use gm_05_delivery_ledger::DeliveryLedgerApi;
    use gm_06_message_processor::{ProcessorError, RejectReason};

    use crate::fixtures::Network;

    fn attacker() -> DevnetGuardians {
        DevnetGuardians::from_seed(19, 0xBAD)
    }

    fn assert_untouched(network: &Network) {
        assert_eq!(network.deliveries.len().unwrap(), 0);
        assert!(network.sink.is_empty());
    }

    #[test]
    fn test_attacker_keys_claiming_the_real_set() {
        let network = Network::new();
        let envelope = network.inbound(1, b"mint 120000 wETH");
        let forged = attacker().attest(digest(&envelope).unwrap(), 0, 19).unwrap();

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, forged.signatures, envelope).unwrap().encode())
            .unwrap_err();

        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 0 })
        );
        assert_untouched(&network);
    }

    #[test]
    fn test_attacker_points_at_unknown_guardian_set() {
        let network = Network::new();
        let envelope = network.inbound(1, b"mint 120000 wETH");
        let d = digest(&envelope).unwrap();
        let forged = attacker().attest(d, 7, 19).unwrap();

        let err = network
            .processor
            .receive(&encode(&envelope).unwrap(), &forged)
            .unwrap_err();

        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::UnknownSignerSet {
                index: 7,
                expired_at: None,
            })
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::UnknownSignerSet));
        assert_untouched(&network);
    }

    #[test]
    fn test_empty_signature_list_is_not_a_bypass() {
        let network = Network::new();
        let envelope = network.inbound(1, b"no signatures at all");
        let empty = Attestation {
            digest: digest(&envelope).unwrap(),
            guardian_set_index: 0,
            signatures: vec![],
        };

        let err = network
            .processor
            .receive(&encode(&envelope).unwrap(), &empty)
            .unwrap_err();

        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::QuorumNotMet {
                valid: 0,
                required: 13,
                set_size: 19,
            })
        );
        assert_untouched(&network);
    }

    #[test]
    fn test_partial_quorum_padded_with_forgeries() {
        let network = Network::new();
        let envelope = network.inbound(1, b"twelve real, one fake");
        let d = digest(&envelope).unwrap();

        let mut signatures = network
            .guardians
            .sign_with(&d, &(0..12).collect::<Vec<u8>>())
            .unwrap();
        signatures.push(attacker().sign(&d, 12).unwrap());

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();

        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 12 })
        );
        assert_untouched(&network);
    }
}
