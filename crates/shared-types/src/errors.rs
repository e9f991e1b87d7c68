//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

use crate::entities::ChainId;

/// Errors from the key-value storage port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Stored bytes could not be interpreted.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// Key not found.
    #[error("Key not found in KV store")]
    NotFound,
}

/// Errors building a universal address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Native address has the wrong number of bytes for its chain.
    #[error("Wrong address width for {chain}: expected {expected} bytes, got {actual}")]
    WrongWidth {
        chain: ChainId,
        expected: usize,
        actual: usize,
    },

    /// Hex string could not be decoded.
    #[error("Invalid hex address")]
    InvalidHex,
}
