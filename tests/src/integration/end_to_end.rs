//! # End-to-End Flow
//!
//! A messenger on chain 1 sends `"hello"`; 14 of 19 guardians attest it; a
//! messenger on chain 2 redeems it exactly once.
//!
//! ## Flow Tested:
//!
//! 1. **Sequence Ledger (02) → Envelope Codec (01)**: first send gets sequence 1
//! 2. **Attestation Verifier (04)**: 14 of 19 signatures, quorum 13
//! 3. **Emitter Registry (03)**: chain 1 → `0xAA..AA` is trusted
//! 4. **Delivery Ledger (05)**: first redemption inserts, the second replays

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gm_01_envelope_codec::{decode, digest};
    use gm_03_emitter_registry::{EmitterRegistryApi, OwnerCredential, RegistryError};
    use gm_04_attestation_verifier::{
        quorum, InMemoryGuardianSetStore, SignedVaa, VerificationError,
    };
    use gm_05_delivery_ledger::DeliveryLedgerApi;
    use gm_06_message_processor::{
        in_memory_ports, CollectingSink, InboundOutcome, InboundState, MessageProcessor,
        MessengerConfig, ProcessorError, RejectReason,
    };
    use gm_telemetry::{encode_metrics, register_metrics, REPLAYS};
    use shared_types::{ChainId, ManualTimeSource, MessageKey, UniversalAddress};

    use crate::fixtures::{foreign_emitter, owner, Network, GENESIS_TIME, GUARDIAN_COUNT};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// The messenger deployed at the trusted foreign emitter on chain 1.
    fn sender(network: &Network) -> MessageProcessor {
        let emitter = foreign_emitter();
        let config = MessengerConfig {
            local_chain: emitter.chain,
            emitter_address: emitter.address,
            owner_secret: OwnerCredential::new([0x77; 32]),
            ..MessengerConfig::default()
        };
        let ports = in_memory_ports(
            &config,
            Arc::new(InMemoryGuardianSetStore::with_initial_set(
                network.guardians.addresses(),
                GENESIS_TIME,
                config.guardian_set_ttl_secs,
            )),
            Arc::new(ManualTimeSource::new(GENESIS_TIME)),
            Arc::new(CollectingSink::new()),
        );
        MessageProcessor::new(config.local_emitter(), config.expiry_policy, ports)
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[test]
    fn test_hello_is_delivered_exactly_once() {
        let network = Network::new();
        let sender = sender(&network);

        // Outbound on chain 1
        let ready = sender.send(b"hello".to_vec(), 0, 1).unwrap();
        assert_eq!(ready.envelope.sequence, 1);
        assert_eq!(ready.envelope.emitter(), foreign_emitter());
        assert_eq!(decode(&ready.bytes).unwrap(), ready.envelope);
        assert_eq!(ready.digest, digest(&ready.envelope).unwrap());

        // 14 of 19 guardians sign the digest
        assert_eq!(quorum(GUARDIAN_COUNT), 13);
        let attestation = network.guardians.attest(ready.digest, 0, 14).unwrap();

        // Inbound on chain 2, one stage at a time
        let verified = network
            .processor
            .verify(decode(&ready.bytes).unwrap(), &attestation)
            .unwrap();
        assert_eq!(verified.attestation().valid_signatures, 14);
        assert_eq!(verified.attestation().quorum, 13);

        let authorized = network.processor.authorize(verified).unwrap();
        let outcome = network.processor.commit(authorized).unwrap();

        let key = MessageKey::new(foreign_emitter(), 1);
        assert_eq!(outcome.state(), InboundState::Delivered);
        assert_eq!(outcome.key(), key);
        assert_eq!(network.sink.len(), 1);
        assert_eq!(network.sink.deliveries()[0].payload, b"hello");
        assert_eq!(network.deliveries.get(&key).unwrap().unwrap().payload, b"hello");
    }

    #[test]
    fn test_resubmission_is_a_replay_and_changes_nothing() {
        register_metrics().unwrap();
        let network = Network::new();
        let sender = sender(&network);
        let ready = sender.send(b"hello".to_vec(), 0, 1).unwrap();
        let attestation = network.guardians.attest(ready.digest, 0, 14).unwrap();

        let first = network.processor.receive(&ready.bytes, &attestation).unwrap();
        let record = network.deliveries.get(&first.key()).unwrap();
        let replays_before = REPLAYS.get();

        network.clock.advance(3_600);
        let second = network.processor.receive(&ready.bytes, &attestation).unwrap();

        assert_eq!(second, InboundOutcome::AlreadyDelivered(first.key()));
        assert_eq!(second.state(), InboundState::Rejected(RejectReason::Replay));
        assert!(RejectReason::Replay.is_benign());
        assert_eq!(network.deliveries.get(&first.key()).unwrap(), record);
        assert_eq!(network.deliveries.len().unwrap(), 1);
        assert_eq!(network.sink.len(), 1);

        // Counters are process-global; other tests may replay concurrently.
        assert!(REPLAYS.get() >= replays_before + 1.0);
        assert!(encode_metrics().unwrap().contains("gm_replays_total"));
    }

    #[test]
    fn test_quorum_boundary_at_nineteen_guardians() {
        let network = Network::new();

        let at_quorum = network.inbound(1, b"thirteen");
        let outcome = network
            .processor
            .receive_vaa(&network.vaa(at_quorum, 13))
            .unwrap();
        assert!(outcome.is_delivered());

        let below = network.inbound(2, b"twelve");
        let err = network
            .processor
            .receive_vaa(&network.vaa(below, 12))
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::QuorumNotMet {
                valid: 12,
                required: 13,
                set_size: 19,
            })
        );
        assert_eq!(network.deliveries.len().unwrap(), 1);
    }

    #[test]
    fn test_signed_vaa_round_trips_through_the_wire() {
        let network = Network::new();
        let envelope = network.inbound(9, b"over the wire");
        let bytes = network.vaa(envelope.clone(), 19);

        let parsed = SignedVaa::parse(&bytes).unwrap();
        assert_eq!(parsed.envelope(), &envelope);
        assert_eq!(parsed.signatures.len(), 19);
        assert!(network.processor.receive_vaa(&bytes).unwrap().is_delivered());
    }

    #[test]
    fn test_non_owner_registration_leaves_registry_unchanged() {
        let network = Network::new();
        let registry = network.processor.registry();
        let before = registry.registrations().unwrap();

        let err = registry
            .register(
                &OwnerCredential::new([0x66; 32]),
                ChainId::SOLANA,
                UniversalAddress([0xEE; 32]),
            )
            .unwrap_err();

        assert_eq!(err, RegistryError::Unauthorized);
        assert_eq!(registry.registrations().unwrap(), before);
        assert_eq!(registry.lookup(ChainId::SOLANA).unwrap(), foreign_emitter().address);

        // The owner may still rotate the trusted emitter.
        let previous = registry
            .register(&owner(), ChainId::SOLANA, UniversalAddress([0xEE; 32]))
            .unwrap();
        assert_eq!(previous.map(|p| p.address), Some(foreign_emitter().address));
    }
}
