//! # Adapters
//!
//! - `CollectingSink` / `ChannelSink`: application delivery targets
//! - `DevnetAttestationOracle`: guardian network backed by `DevnetGuardians`
//! - `LoopbackTransport`: in-process "chain" that feeds the devnet oracle

pub mod devnet_oracle;
pub mod sink;
pub mod transport;

pub use devnet_oracle::DevnetAttestationOracle;
pub use sink::{ChannelSink, CollectingSink};
pub use transport::LoopbackTransport;
