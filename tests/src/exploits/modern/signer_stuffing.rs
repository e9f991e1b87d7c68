//! # Signer Stuffing
//!
//! Reach quorum by counting one guardian several times, or by claiming
//! signer slots the guardian set does not have.
//!
//! ## Expected Defense
//!
//! - A repeated signer index rejects the attestation wherever it appears
//! - An index at or beyond the set size rejects the attestation
//! - Both checks run before any signature is recovered

#[cfg(test)]
mod tests {
    use gm_01_envelope_codec::digest;
    use gm_04_attestation_verifier::{SignedVaa, VerificationError};
    use gm_05_delivery_ledger::DeliveryLedgerApi;
    use gm_06_message_processor::{ProcessorError, RejectReason};

    use crate::fixtures::Network;

    #[test]
    fn test_one_guardian_counted_thirteen_times() {
        let network = Network::new();
        let envelope = network.inbound(1, b"echo");
        let d = digest(&envelope).unwrap();
        let signatures = network.guardians.sign_with(&d, &[5; 13]).unwrap();

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::DuplicateSigner { index: 5 })
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::DuplicateSigner));
        assert_eq!(network.deliveries.len().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_hidden_after_a_valid_quorum() {
        let network = Network::new();
        let envelope = network.inbound(1, b"quorum plus one repeat");
        let d = digest(&envelope).unwrap();
        let mut indices: Vec<u8> = (0..13).collect();
        indices.push(2);
        let signatures = network.guardians.sign_with(&d, &indices).unwrap();

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::DuplicateSigner { index: 2 })
        );
    }

    #[test]
    fn test_signer_slots_beyond_the_set() {
        let network = Network::new();
        let envelope = network.inbound(1, b"phantom guardians");
        let d = digest(&envelope).unwrap();

        // A 20-guardian network signing for a 19-guardian set.
        let wider = gm_04_attestation_verifier::DevnetGuardians::from_seed(20, 2022);
        let signatures = wider.sign_with(&d, &(7..20).collect::<Vec<u8>>()).unwrap();

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::OutOfRangeSigner {
                index: 19,
                set_size: 19,
            })
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::OutOfRangeSigner));
        assert_eq!(network.deliveries.len().unwrap(), 0);
    }

    #[test]
    fn test_structural_rejection_precedes_signature_checks() {
        let network = Network::new();
        let envelope = network.inbound(1, b"garbage then duplicate");
        let d = digest(&envelope).unwrap();
        let mut signatures = network.guardians.sign_with(&d, &[0, 1, 1]).unwrap();
        signatures[0].signature = [0xEE; 65];

        // Signature 0 is garbage, but the duplicate is reported.
        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::DuplicateSigner { index: 1 })
        );
    }
}
