//! # Port Wiring
//!
//! Builds `ProcessorPorts` from a `MessengerConfig`.
//!
//! | Backend | Ledgers | Use |
//! |---------|---------|-----|
//! | `in_memory_ports` | `InMemory*` | tests, devnet |
//! | `file_backed_ports` | `Kv*` over `FileBackedKVStore` | single node |
//! | `rocksdb_ports` | `Kv*` over `RocksDbStore` | production (`rocksdb` feature) |
//!
//! Guardian sets, the clock and the sink are always supplied by the caller.
//! Each ledger gets its own store, so no two ledgers share a lock.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gm_02_sequence_ledger::{InMemorySequenceLedger, KvSequenceLedger};
use gm_03_emitter_registry::{InMemoryEmitterRegistry, KvEmitterRegistry};
use gm_04_attestation_verifier::GuardianSetResolver;
use gm_05_delivery_ledger::{InMemoryDeliveryLedger, KvDeliveryLedger};
use shared_types::{FileBackedKVStore, KVStoreError, KeyValueStore, TimeSource};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, MessengerConfig};
use crate::ports::DeliverySink;
use crate::service::ProcessorPorts;

/// Sequence counter store file.
pub const SEQUENCE_DB: &str = "sequence.db";
/// Emitter registry store file.
pub const REGISTRY_DB: &str = "registry.db";
/// Delivery ledger store file.
pub const RECEIVED_DB: &str = "received.db";

/// Wiring failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WiringError {
    /// The configuration did not validate.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A persistent backend needs `data_dir`.
    #[error("GM_DATA_DIR must be set for persistent storage")]
    MissingDataDir,

    /// A store could not be opened.
    #[error("Failed to open {path}: {source}")]
    Storage {
        /// Store location
        path: PathBuf,
        /// Underlying failure
        source: KVStoreError,
    },
}

/// Ports backed entirely by memory.
pub fn in_memory_ports(
    config: &MessengerConfig,
    guardian_sets: Arc<dyn GuardianSetResolver>,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn DeliverySink>,
) -> ProcessorPorts {
    ProcessorPorts {
        sequences: Arc::new(InMemorySequenceLedger::new()),
        registry: Arc::new(InMemoryEmitterRegistry::new(
            config.owner_secret.clone(),
            config.local_chain,
        )),
        guardian_sets,
        deliveries: Arc::new(InMemoryDeliveryLedger::new()),
        clock,
        sink,
    }
}

/// Ports persisting every ledger under `config.data_dir`.
///
/// The configuration is validated first; a messenger never writes state
/// with a zero owner secret or an unset emitter.
pub fn file_backed_ports(
    config: &MessengerConfig,
    guardian_sets: Arc<dyn GuardianSetResolver>,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn DeliverySink>,
) -> Result<ProcessorPorts, WiringError> {
    persistent_ports(config, guardian_sets, clock, sink, |path| {
        FileBackedKVStore::open(path)
    })
}

/// Ports persisting every ledger in RocksDB databases under
/// `config.data_dir`.
#[cfg(feature = "rocksdb")]
pub fn rocksdb_ports(
    config: &MessengerConfig,
    guardian_sets: Arc<dyn GuardianSetResolver>,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn DeliverySink>,
) -> Result<ProcessorPorts, WiringError> {
    persistent_ports(config, guardian_sets, clock, sink, |path| {
        shared_types::RocksDbStore::open_default(path)
    })
}

fn persistent_ports<S, F>(
    config: &MessengerConfig,
    guardian_sets: Arc<dyn GuardianSetResolver>,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn DeliverySink>,
    open: F,
) -> Result<ProcessorPorts, WiringError>
where
    S: KeyValueStore + 'static,
    F: Fn(&Path) -> Result<S, KVStoreError>,
{
    config.validate()?;
    let dir = config.data_dir.as_deref().ok_or(WiringError::MissingDataDir)?;
    std::fs::create_dir_all(dir).map_err(|e| WiringError::Storage {
        path: dir.to_path_buf(),
        source: KVStoreError::IOError {
            message: e.to_string(),
        },
    })?;

    let open_at = |name: &str| {
        let path = dir.join(name);
        open(&path).map_err(|source| WiringError::Storage { path, source })
    };

    let ports = ProcessorPorts {
        sequences: Arc::new(KvSequenceLedger::new(open_at(SEQUENCE_DB)?)),
        registry: Arc::new(KvEmitterRegistry::new(
            config.owner_secret.clone(),
            config.local_chain,
            open_at(REGISTRY_DB)?,
        )),
        guardian_sets,
        deliveries: Arc::new(KvDeliveryLedger::new(open_at(RECEIVED_DB)?)),
        clock,
        sink,
    };
    info!("[gm-06] Ledgers opened under {}", dir.display());
    Ok(ports)
}
