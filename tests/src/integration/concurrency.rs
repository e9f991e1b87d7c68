//! # Concurrency
//!
//! Sequence issuance and redemption under parallel callers. Every ledger
//! operation is an atomic check-and-set, so the observable results must be
//! exactly those of some serial order.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use gm_02_sequence_ledger::{InMemorySequenceLedger, KvSequenceLedger, SequenceLedgerApi};
    use gm_05_delivery_ledger::{
        DeliveryLedgerApi, DeliveryRecord, InMemoryDeliveryLedger, KvDeliveryLedger,
        RecordOutcome,
    };
    use proptest::prelude::*;
    use shared_types::{ChainId, EmitterKey, InMemoryKVStore, MessageKey, UniversalAddress};

    use crate::fixtures::{foreign_emitter, Network};

    fn emitter(byte: u8) -> EmitterKey {
        EmitterKey::new(ChainId::SOLANA, UniversalAddress([byte; 32]))
    }

    fn record(tag: u8) -> DeliveryRecord {
        DeliveryRecord {
            payload: vec![tag],
            digest: [tag; 32],
            nonce: u32::from(tag),
            redeemed_at: 0,
        }
    }

    /// Issue `callers` sequences from parallel tokio tasks.
    async fn issue_in_parallel(ledger: Arc<dyn SequenceLedgerApi>, callers: u64) -> Vec<u64> {
        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.next(&emitter(0xAA)).unwrap() })
            })
            .collect();

        let mut issued = Vec::with_capacity(handles.len());
        for handle in handles {
            issued.push(handle.await.unwrap());
        }
        issued
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_parallel_callers_receive_exactly_one_to_n() {
        let ledger: Arc<dyn SequenceLedgerApi> = Arc::new(InMemorySequenceLedger::new());
        let issued = issue_in_parallel(Arc::clone(&ledger), 500).await;

        let unique: BTreeSet<u64> = issued.iter().copied().collect();
        assert_eq!(unique.len(), 500, "duplicate sequence issued");
        assert_eq!(unique, (1..=500).collect());
        assert_eq!(ledger.current(&emitter(0xAA)).unwrap(), 500);
        assert_eq!(ledger.current(&emitter(0xBB)).unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_kv_sequence_ledger_under_parallel_callers() {
        let ledger: Arc<dyn SequenceLedgerApi> =
            Arc::new(KvSequenceLedger::new(InMemoryKVStore::new()));
        let issued = issue_in_parallel(Arc::clone(&ledger), 200).await;

        let unique: BTreeSet<u64> = issued.into_iter().collect();
        assert_eq!(unique, (1..=200).collect());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_double_record_yields_one_insert() {
        for ledger in [
            Arc::new(InMemoryDeliveryLedger::new()) as Arc<dyn DeliveryLedgerApi>,
            Arc::new(KvDeliveryLedger::new(InMemoryKVStore::new())),
        ] {
            let key = MessageKey::new(foreign_emitter(), 1);
            let a = {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.record_if_absent(key, record(1)).unwrap() })
            };
            let b = {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.record_if_absent(key, record(2)).unwrap() })
            };

            let mut outcomes = vec![a.await.unwrap(), b.await.unwrap()];
            outcomes.sort_by_key(|o| !o.is_inserted());
            assert_eq!(
                outcomes,
                vec![RecordOutcome::Inserted, RecordOutcome::AlreadyDelivered]
            );

            // Whichever writer won, its record is the one kept.
            let kept = ledger.get(&key).unwrap().unwrap();
            assert!(kept == record(1) || kept == record(2));
            assert_eq!(ledger.len().unwrap(), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_redeem_storm_delivers_each_message_once() {
        let network = Network::new();
        let vaas: Vec<Arc<Vec<u8>>> = (1..=4)
            .map(|seq| Arc::new(network.vaa(network.inbound(seq, b"storm"), 13)))
            .collect();

        let mut handles = Vec::new();
        for _ in 0..8 {
            for vaa in &vaas {
                let processor = Arc::clone(&network.processor);
                let vaa = Arc::clone(vaa);
                handles.push(tokio::task::spawn_blocking(move || {
                    processor.receive_vaa(&vaa).unwrap().is_delivered()
                }));
            }
        }

        let mut delivered = 0;
        for handle in handles {
            if handle.await.unwrap() {
                delivered += 1;
            }
        }

        assert_eq!(delivered, 4);
        assert_eq!(network.sink.len(), 4);
        assert_eq!(network.deliveries.len().unwrap(), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_threads_share_one_gapless_sequence(threads in 1usize..8, per_thread in 1usize..40) {
            let ledger = InMemorySequenceLedger::new();
            let issued: Vec<u64> = std::thread::scope(|s| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        s.spawn(|| {
                            (0..per_thread)
                                .map(|_| ledger.next(&emitter(0x01)).unwrap())
                                .collect::<Vec<_>>()
                        })
                    })
                    .collect();
                handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
            });

            let n = (threads * per_thread) as u64;
            let unique: BTreeSet<u64> = issued.iter().copied().collect();
            prop_assert_eq!(issued.len() as u64, n);
            prop_assert_eq!(unique, (1..=n).collect::<BTreeSet<u64>>());
        }
    }
}
