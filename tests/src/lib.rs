//! # Guardian Messenger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Devnet network shared by every category
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── gm_01_codec.rs
//! │   ├── gm_04_verifier.rs
//! │   └── gm_06_processor.rs
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── historical/   # Famous past bridge attacks
//! │   ├── modern/       # Signature and replay races
//! │   └── architectural/# Trust-boundary attacks
//! │
//! └── integration/      # Cross-subsystem flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gm-tests
//!
//! # By category
//! cargo test -p gm-tests integration::
//! cargo test -p gm-tests exploits::historical::
//! cargo test -p gm-tests exploits::modern::
//! cargo test -p gm-tests exploits::architectural::
//!
//! # Benchmarks
//! cargo bench -p gm-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
