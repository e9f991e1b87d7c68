//! # Domain Module
//!
//! Envelope entity, canonical codec and application payloads.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod payload;
