//! # Message Processor (GM-06)
//!
//! Orchestrates the outbound and inbound paths of the messenger.
//!
//! **Subsystem ID:** 06
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Outbound
//!
//! `Compose -> AllocateSequence -> EncodeEnvelope -> Ready`. The processor's
//! responsibility ends once the encoded envelope is returned.
//!
//! ## Inbound
//!
//! `Received -> Verified -> Authorized -> Delivered`, or `Rejected(reason)`
//! at any step. A replay ends in `Rejected(Replay)` but is reported as the
//! non-error outcome `InboundOutcome::AlreadyDelivered`.
//!
//! The staged API (`verify`, `authorize`, `commit`) hands out
//! `VerifiedMessage` and `AuthorizedMessage` tokens that can only be built by
//! the previous stage, so no step can be skipped.
//!
//! ## Module Structure
//!
//! ```text
//! gm-06-message-processor/
//! ├── domain/      # states, reject reasons, outcomes, errors
//! ├── ports/       # DeliverySink, AttestationOracle, Transport
//! ├── adapters/    # sinks, devnet oracle, loopback transport
//! ├── config.rs    # MessengerConfig from GM_* variables
//! ├── poller.rs    # bounded attestation polling
//! ├── service.rs   # MessageProcessor
//! ├── messenger.rs # Hello messenger application
//! └── wiring.rs    # in-memory and file-backed port sets
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod messenger;
pub mod poller;
pub mod ports;
pub mod service;
pub mod wiring;

pub use adapters::{ChannelSink, CollectingSink, DevnetAttestationOracle, LoopbackTransport};
pub use config::{ConfigError, MessengerConfig, CONSISTENCY_CONFIRMED, CONSISTENCY_FINALIZED};
pub use domain::{
    AuthorizedMessage, Delivery, InboundOutcome, InboundState, InvalidMessage, MessengerError,
    OracleError, OutboundState, ProcessorError, ReadyMessage, RejectReason, TransactionRef,
    TransportError, VerifiedMessage,
};
pub use messenger::Messenger;
pub use poller::{AttestationPoller, PollOutcome};
pub use ports::{AttestationOracle, DeliverySink, Transport};
pub use service::{MessageProcessor, ProcessorPorts};
pub use wiring::{file_backed_ports, in_memory_ports, WiringError};
#[cfg(feature = "rocksdb")]
pub use wiring::rocksdb_ports;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
