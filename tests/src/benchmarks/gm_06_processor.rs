//! # GM-06 Message Processor Benchmarks
//!
//! Full pipeline cost: outbound `send`, inbound `receive_vaa` for a fresh
//! message, and the replay path that must stay cheaper than verification
//! would suggest (it still verifies, then hits the ledger).

use std::time::Duration;

use criterion::{black_box, BatchSize, Criterion, Throughput};

use crate::fixtures::Network;

/// Outbound send, including sequence allocation.
pub fn processor_send(c: &mut Criterion) {
    let mut group = c.benchmark_group("gm-06/send");
    let network = Network::new();
    let payload = vec![0x5A; 256];

    group.throughput(Throughput::Elements(1));
    group.bench_function("payload_256", |b| {
        b.iter(|| black_box(network.processor.send(payload.clone(), 0, 0)))
    });
    group.finish();
}

/// Inbound delivery of fresh messages and replays.
pub fn processor_receive(c: &mut Criterion) {
    let mut group = c.benchmark_group("gm-06/receive");
    group.measurement_time(Duration::from_secs(10));

    let network = Network::new();
    let mut sequence = 0u64;
    group.bench_function("fresh_vaa", |b| {
        b.iter_batched(
            || {
                sequence += 1;
                network.vaa(network.inbound(sequence, b"bench"), 13)
            },
            |vaa| black_box(network.processor.receive_vaa(&vaa)),
            BatchSize::SmallInput,
        )
    });

    let replay = network.vaa(network.inbound(u64::MAX, b"replayed"), 13);
    let _ = network.processor.receive_vaa(&replay);
    group.bench_function("replayed_vaa", |b| {
        b.iter(|| black_box(network.processor.receive_vaa(&replay)))
    });

    group.finish();
}

/// Register all GM-06 benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    processor_send(c);
    processor_receive(c);
}
