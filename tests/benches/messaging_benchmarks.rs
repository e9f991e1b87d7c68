//! # Guardian Messenger Benchmarks
//!
//! | Crate | Path | Target |
//! |-------|------|--------|
//! | gm-01 Envelope Codec | decode 64 KiB envelope | < 100µs |
//! | gm-04 Attestation Verifier | 13-of-19 quorum | < 5ms |
//! | gm-06 Message Processor | fresh VAA end to end | < 10ms |
//!
//! Run with `cargo bench -p gm-tests`.

use criterion::{criterion_group, criterion_main, Criterion};
use gm_tests::benchmarks::{gm_01_codec, gm_04_verifier, gm_06_processor};

fn codec(c: &mut Criterion) {
    gm_01_codec::register_benchmarks(c);
}

fn verifier(c: &mut Criterion) {
    gm_04_verifier::register_benchmarks(c);
}

fn processor(c: &mut Criterion) {
    gm_06_processor::register_benchmarks(c);
}

criterion_group!(benches, codec, verifier, processor);
criterion_main!(benches);
