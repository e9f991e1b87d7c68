//! # Domain Module
//!
//! Pure verification logic: no I/O, no clocks.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod vaa;
pub mod verifier;
