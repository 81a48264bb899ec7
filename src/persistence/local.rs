//! Browser LocalStorage store
//!
//! LocalStorage writes are synchronous, so `flush` has nothing to do.

use super::KeyValueStore;
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(Some(text)) => text
                .parse()
                .map_err(|_| StoreError::Corrupt(format!("{key} = {text:?}"))),
            Ok(None) => Ok(0),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
