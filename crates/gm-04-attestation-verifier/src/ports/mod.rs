//! # Ports

pub mod inbound;
pub mod outbound;

pub use inbound::AttestationVerifierApi;
pub use outbound::GuardianSetResolver;
