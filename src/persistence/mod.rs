//! Key-value persistence for values that outlive a run
//!
//! Backends:
//! - `MemoryStore`: in-process, for tests and fallback
//! - `JsonFileStore`: JSON file with tmp-then-rename writes (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Missing keys read as 0.

use std::collections::BTreeMap;

use crate::error::StoreError;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

/// Integer key-value store collaborator
pub trait KeyValueStore {
    /// Read a value; missing keys are 0
    fn get_integer(&self, key: &str) -> Result<i64, StoreError>;
    /// Stage a value; durable after `flush`
    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
    /// Write staged values to durable storage
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    /// Number of flushes, for inspection
    pub flushes: u32,
    /// Number of writes, for inspection
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self.values.get(key).copied().unwrap_or(0))
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Store whose every operation fails, for running without storage
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_integer(&self, _key: &str) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set_integer(&mut self, _key: &str, _value: i64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
