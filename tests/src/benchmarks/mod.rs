//! # Guardian Messenger Benchmarks
//!
//! Hot paths of the messaging core under realistic and adversarial input.
//! Each module exposes `register_benchmarks` for the criterion harness in
//! `benches/messaging_benchmarks.rs`.

pub mod gm_06_processor;
