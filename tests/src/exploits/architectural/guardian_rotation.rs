//! # Guardian Rotation
//!
//! After a rotation the retired guardians still hold valid keys. If one of
//! them is later compromised, attestations under the retired set must stop
//! working once its grace window closes.
//!
//! ## Expected Defense
//!
//! - A retired set verifies only until `rotation + ttl`
//! - Under `Strict`, expiry is judged by the receiver's clock alone
//! - Under `AttestedBeforeExpiry`, envelopes stamped before expiry still pass
//! - The new set is usable immediately

#[cfg(test)]
mod tests {
    use gm_01_envelope_codec::{digest, Envelope};
    use gm_04_attestation_verifier::{
        DevnetGuardians, ExpiryPolicy, SignedVaa, VerificationError,
        DEFAULT_GUARDIAN_SET_TTL_SECS,
    };
    use gm_06_message_processor::{ProcessorError, RejectReason};
    use shared_types::TimeSource;

    use crate::fixtures::{foreign_emitter, Network, GENESIS_TIME, GUARDIAN_COUNT};

    /// Rotation happens one hour after genesis.
    const ROTATED_AT: u64 = GENESIS_TIME + 3_600;
    const EXPIRES_AT: u64 = ROTATED_AT + DEFAULT_GUARDIAN_SET_TTL_SECS;

    fn rotate(network: &Network) -> DevnetGuardians {
        let next = DevnetGuardians::from_seed(GUARDIAN_COUNT, 99);
        network.clock.set(ROTATED_AT);
        assert_eq!(network.guardian_sets.rotate(next.addresses(), ROTATED_AT), 1);
        next
    }

    fn stamped(sequence: u64, timestamp: u64) -> Envelope {
        Envelope::builder(foreign_emitter())
            .timestamp(timestamp as u32)
            .sequence(sequence)
            .payload(b"rotation".to_vec())
            .build()
    }

    fn signed_by(guardians: &DevnetGuardians, set: u32, envelope: Envelope) -> Vec<u8> {
        let attestation = guardians
            .attest(digest(&envelope).unwrap(), set, 13)
            .unwrap();
        SignedVaa::new(set, attestation.signatures, envelope)
            .unwrap()
            .encode()
    }

    #[test]
    fn test_retired_set_valid_within_grace_window() {
        let network = Network::new();
        rotate(&network);
        network.clock.set(EXPIRES_AT - 1);

        let vaa = signed_by(&network.guardians, 0, stamped(1, ROTATED_AT));
        assert!(network.processor.receive_vaa(&vaa).unwrap().is_delivered());
    }

    #[test]
    fn test_retired_set_rejected_after_expiry() {
        let network = Network::new();
        rotate(&network);
        network.clock.advance(DEFAULT_GUARDIAN_SET_TTL_SECS);
        assert_eq!(network.clock.now(), EXPIRES_AT);

        // Compromised old keys, fresh-looking envelope.
        let vaa = signed_by(&network.guardians, 0, stamped(1, EXPIRES_AT));
        let err = network.processor.receive_vaa(&vaa).unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::UnknownSignerSet {
                index: 0,
                expired_at: Some(EXPIRES_AT),
            })
        );
        assert_eq!(err.reject_reason(), Some(RejectReason::UnknownSignerSet));
    }

    #[test]
    fn test_strict_ignores_a_backdated_envelope() {
        let network = Network::new();
        rotate(&network);
        network.clock.set(EXPIRES_AT + 10);

        let vaa = signed_by(&network.guardians, 0, stamped(1, GENESIS_TIME));
        assert!(matches!(
            network.processor.receive_vaa(&vaa),
            Err(ProcessorError::Verification(VerificationError::UnknownSignerSet { index: 0, .. }))
        ));
    }

    #[test]
    fn test_attested_before_expiry_accepts_late_relay() {
        let network = Network::with(GUARDIAN_COUNT, ExpiryPolicy::AttestedBeforeExpiry);
        rotate(&network);
        network.clock.set(EXPIRES_AT + 10);

        let early = signed_by(&network.guardians, 0, stamped(1, EXPIRES_AT - 1));
        assert!(network.processor.receive_vaa(&early).unwrap().is_delivered());

        let late = signed_by(&network.guardians, 0, stamped(2, EXPIRES_AT));
        assert!(matches!(
            network.processor.receive_vaa(&late),
            Err(ProcessorError::Verification(VerificationError::UnknownSignerSet { .. }))
        ));
    }

    #[test]
    fn test_new_set_active_immediately() {
        let network = Network::new();
        let next = rotate(&network);

        let vaa = signed_by(&next, 1, stamped(1, ROTATED_AT));
        assert!(network.processor.receive_vaa(&vaa).unwrap().is_delivered());

        // Old keys claiming the new set index fail signature checks.
        let forged = signed_by(&network.guardians, 1, stamped(2, ROTATED_AT));
        assert_eq!(
            network.processor.receive_vaa(&forged).unwrap_err(),
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 0 })
        );
    }
}
