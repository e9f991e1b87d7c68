//! # Domain Module
//!
//! State machine vocabulary and errors. No I/O.

pub mod entities;
pub mod errors;

pub use entities::{
    AuthorizedMessage, Delivery, InboundOutcome, InboundState, OutboundState, ReadyMessage,
    RejectReason, TransactionRef, VerifiedMessage,
};
pub use errors::{
    InvalidMessage, MessengerError, OracleError, ProcessorError, TransportError,
};
