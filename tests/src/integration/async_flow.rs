//! # Async Messaging Flow
//!
//! Hello messenger on chain 1 talking to a Hello messenger on chain 2
//! through the loopback transport and the devnet guardian network.
//!
//! ## Flow Tested:
//!
//! 1. **Messenger → Transport**: `send_hello` envelope is submitted
//! 2. **Transport → Guardians**: the submission is observed
//! 3. **Poller**: waits for the quorum VAA within the timeout
//! 4. **Messenger (chain 2)**: `receive_hello` delivers to a channel sink

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{anyhow, Context};
    use gm_01_envelope_codec::MessengerPayload;
    use gm_03_emitter_registry::OwnerCredential;
    use gm_04_attestation_verifier::{DevnetGuardians, InMemoryGuardianSetStore};
    use gm_06_message_processor::{
        in_memory_ports, AttestationOracle, AttestationPoller, ChannelSink, CollectingSink,
        Delivery, DeliverySink, DevnetAttestationOracle, LoopbackTransport, MessageProcessor,
        Messenger, MessengerConfig, MessengerError, PollOutcome, ProcessorError, RejectReason,
        Transport,
    };
    use shared_types::{ChainId, ManualTimeSource, UniversalAddress};
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::timeout;

    use crate::fixtures::GENESIS_TIME;

    const SEED: u64 = 0x6D;
    const OWNER: [u8; 32] = [0x31; 32];

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config(chain: ChainId, address: UniversalAddress) -> MessengerConfig {
        MessengerConfig {
            local_chain: chain,
            emitter_address: address,
            owner_secret: OwnerCredential::new(OWNER),
            poll_interval: Duration::from_millis(250),
            attestation_timeout: Duration::from_secs(5),
            ..MessengerConfig::default()
        }
    }

    fn messenger(config: &MessengerConfig, sink: Arc<dyn DeliverySink>) -> Messenger {
        let guardians = DevnetGuardians::from_seed(19, SEED);
        let ports = in_memory_ports(
            config,
            Arc::new(InMemoryGuardianSetStore::with_initial_set(
                guardians.addresses(),
                GENESIS_TIME,
                config.guardian_set_ttl_secs,
            )),
            Arc::new(ManualTimeSource::new(GENESIS_TIME)),
            sink,
        );
        let processor = MessageProcessor::new(config.local_emitter(), config.expiry_policy, ports);
        Messenger::new(Arc::new(processor), config)
    }

    /// Chain 1 sender, chain 2 receiver that trusts it, and the receiver's
    /// delivery channel.
    fn pair() -> (Messenger, MessengerConfig, Messenger, UnboundedReceiver<Delivery>) {
        let solana = config(ChainId::SOLANA, UniversalAddress([0xAA; 32]));
        let ethereum = config(ChainId::ETHEREUM, UniversalAddress::from_evm([0xBB; 20]));

        let sender = messenger(&solana, Arc::new(CollectingSink::new()));
        let (sink, deliveries) = ChannelSink::new();
        let receiver = messenger(&ethereum, Arc::new(sink));
        receiver
            .register_emitter(
                &OwnerCredential::new(OWNER),
                solana.local_chain,
                solana.emitter_address,
            )
            .expect("register sender");

        (sender, solana, receiver, deliveries)
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_hello_travels_between_chains() -> anyhow::Result<()> {
        let (sender, solana, receiver, mut deliveries) = pair();
        let oracle = Arc::new(
            DevnetAttestationOracle::new(DevnetGuardians::from_seed(19, SEED), 0)
                .with_signers(13)
                .with_confirmations(2),
        );
        let transport = LoopbackTransport::observed_by(Arc::clone(&oracle));

        sender.initialize()?;
        let ready = sender.send_hello(b"gm from solana")?;
        let tx = transport.submit(&ready).await?;
        let key = transport
            .emitted(&tx)
            .await?
            .ok_or_else(|| anyhow!("transaction {} emitted nothing", tx))?;
        assert_eq!(key, ready.key());
        assert_eq!(key.sequence, 2);

        let poller = AttestationPoller::from_config(Arc::clone(&oracle), &solana);
        let vaa = match poller.poll(&key).await? {
            PollOutcome::Attested(vaa) => vaa,
            other => return Err(anyhow!("no attestation: {:?}", other)),
        };
        assert_eq!(vaa.signatures.len(), 13);

        let outcome = receiver.receive_hello(&vaa.encode())?;
        assert!(outcome.is_delivered());

        let delivery = timeout(Duration::from_millis(100), deliveries.recv())
            .await
            .context("timeout waiting for delivery")?
            .context("delivery channel closed")?;
        assert_eq!(delivery.key, key);
        assert_eq!(
            MessengerPayload::decode(&delivery.payload)?,
            MessengerPayload::Hello {
                message: b"gm from solana".to_vec()
            }
        );

        // A second redemption is an idempotent no-op and delivers nothing.
        assert!(!receiver.receive_hello(&vaa.encode())?.is_delivered());
        assert!(deliveries.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_alive_announcement_is_refused_by_receiver() -> anyhow::Result<()> {
        let (sender, _, receiver, mut deliveries) = pair();
        let oracle = Arc::new(DevnetAttestationOracle::new(
            DevnetGuardians::from_seed(19, SEED),
            0,
        ));
        let transport = LoopbackTransport::observed_by(Arc::clone(&oracle));

        let alive = sender.initialize()?;
        transport.submit(&alive).await?;
        let bytes = oracle
            .fetch(&alive.key())
            .await?
            .ok_or_else(|| anyhow!("alive not attested"))?;

        let err = receiver
            .receive_hello(&bytes)
            .err()
            .ok_or_else(|| anyhow!("alive accepted"))?;
        assert_eq!(err.reject_reason(), Some(RejectReason::InvalidPayload));
        assert!(receiver.received(&alive.key())?.is_none());
        assert!(deliveries.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_under_signed_vaa_fails_quorum_at_receiver() -> anyhow::Result<()> {
        let (sender, solana, receiver, _deliveries) = pair();
        let oracle = Arc::new(
            DevnetAttestationOracle::new(DevnetGuardians::from_seed(19, SEED), 0).with_signers(12),
        );
        let transport = LoopbackTransport::observed_by(Arc::clone(&oracle));

        let ready = sender.send_hello(b"short of quorum")?;
        transport.submit(&ready).await?;
        let vaa = AttestationPoller::from_config(Arc::clone(&oracle), &solana)
            .poll(&ready.key())
            .await?
            .into_vaa()
            .ok_or_else(|| anyhow!("no attestation"))?;

        let err = receiver.receive_hello(&vaa.encode()).unwrap_err();
        assert!(matches!(
            err,
            MessengerError::Processor(ProcessorError::Verification(_))
        ));
        assert_eq!(err.reject_reason(), Some(RejectReason::QuorumNotMet));
        assert!(receiver.received(&ready.key())?.is_none());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unobserved_message_is_not_yet_available() -> anyhow::Result<()> {
        let (sender, solana, _, _) = pair();
        let oracle = Arc::new(DevnetAttestationOracle::new(
            DevnetGuardians::from_seed(19, SEED),
            0,
        ));

        // Submitted to a chain no guardian watches.
        let transport = LoopbackTransport::new();
        let ready = sender.send_hello(b"into the void")?;
        transport.submit(&ready).await?;
        assert_eq!(transport.submitted(), 1);

        let outcome = AttestationPoller::from_config(oracle, &solana)
            .poll(&ready.key())
            .await?;
        match outcome {
            PollOutcome::NotYetAvailable { attempts, waited } => {
                assert!(attempts > 1);
                assert!(waited >= solana.attestation_timeout);
            }
            PollOutcome::Attested(_) => return Err(anyhow!("attested without observation")),
        }

        // Polling never touched the sender's ledgers.
        assert_eq!(sender.processor().current_sequence()?, 1);
        Ok(())
    }
}
