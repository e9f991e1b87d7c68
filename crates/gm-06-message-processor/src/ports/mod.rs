//! # Ports
//!
//! - Outbound: `DeliverySink` (application), `AttestationOracle` and
//!   `Transport` (external collaborators)

pub mod outbound;

pub use outbound::{AttestationOracle, DeliverySink, Transport};
