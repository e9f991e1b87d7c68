//! # Domain Module

pub mod entities;
pub mod errors;

pub use entities::{delivery_storage_key, DeliveryRecord, RecordOutcome, DELIVERY_KEY_PREFIX};
pub use errors::DeliveryError;
