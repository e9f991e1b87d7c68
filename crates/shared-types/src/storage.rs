//! # Key-Value Storage Port
//!
//! Durable state for the ledgers and the emitter registry goes through
//! `KeyValueStore`. Adapters:
//!
//! - `InMemoryKVStore`: tests and ephemeral nodes
//! - `FileBackedKVStore`: single-file persistence without native deps
//! - `RocksDbStore`: production (feature `rocksdb`)
//!
//! Keys are namespaced by a short ASCII prefix (`b"sequence"`,
//! `b"foreign_emitter"`, `b"received"`) followed by fixed-width big-endian
//! fields, so `prefix_scan` results come back in numeric order.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::KVStoreError;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either all operations in the batch are applied, or none are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

fn apply_batch(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}

fn scan(data: &BTreeMap<Vec<u8>, Vec<u8>>, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    data.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// In-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        apply_batch(&mut self.data, operations);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}

/// File-backed key-value store.
///
/// Keeps the full map in memory and rewrites the file on every mutation via
/// a temp file plus rename, so a crash leaves either the old or the new
/// snapshot on disk.
///
/// ## File Format
///
/// `b"GMKV" || version:u8 || ([key_len:u32 BE][key][value_len:u32 BE][value])*`
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    const MAGIC: &'static [u8; 4] = b"GMKV";
    const FORMAT_VERSION: u8 = 1;

    /// Open (or create) a store at `path`.
    ///
    /// A missing file starts empty. A file that exists but does not parse is
    /// reported as corruption rather than silently discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(io_err)?;
                let data = Self::decode(&bytes)?;
                tracing::info!(
                    "[storage] Loaded {} keys from {}",
                    data.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[storage] No existing store at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(io_err(e)),
        };

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut data = BTreeMap::new();
        if bytes.is_empty() {
            return Ok(data);
        }
        if bytes.len() < 5 || &bytes[..4] != Self::MAGIC {
            return Err(corrupt("missing file header"));
        }
        if bytes[4] != Self::FORMAT_VERSION {
            return Err(corrupt(format!("unknown format version {}", bytes[4])));
        }

        let mut cursor = 5;
        while cursor < bytes.len() {
            let key = read_chunk(bytes, &mut cursor)?;
            let value = read_chunk(bytes, &mut cursor)?;
            data.insert(key, value);
        }
        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut bytes = Vec::with_capacity(5);
        bytes.extend_from_slice(Self::MAGIC);
        bytes.push(Self::FORMAT_VERSION);
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_be_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_be_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        Ok(())
    }

    /// Apply `mutate` and persist; roll the in-memory map back on I/O failure.
    fn persist_with<F>(&mut self, mutate: F) -> Result<(), KVStoreError>
    where
        F: FnOnce(&mut BTreeMap<Vec<u8>, Vec<u8>>),
    {
        let snapshot = self.data.clone();
        mutate(&mut self.data);
        if let Err(e) = self.save_to_file() {
            self.data = snapshot;
            return Err(e);
        }
        Ok(())
    }
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let len_end = *cursor + 4;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| corrupt("truncated length prefix"))?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    let end = len_end
        .checked_add(len)
        .ok_or_else(|| corrupt("length overflow"))?;
    let chunk = bytes
        .get(len_end..end)
        .ok_or_else(|| corrupt("truncated entry"))?
        .to_vec();
    *cursor = end;
    Ok(chunk)
}

fn io_err(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn corrupt(message: impl Into<String>) -> KVStoreError {
    KVStoreError::CorruptionError {
        message: message.into(),
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.persist_with(|data| {
            data.insert(key.to_vec(), value.to_vec());
        })
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.persist_with(|data| {
            data.remove(key);
        })
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.persist_with(|data| apply_batch(data, operations))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}
