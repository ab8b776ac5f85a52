//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the [`KeyValueStorage`] used on the **web platform**. It is a
//! zero-size handle that looks up `window.localStorage` on every call, so it can be
//! cloned into any component or client without holding a JS reference.
//!
//! Reads swallow errors (private browsing modes can refuse storage access) and
//! report "no data". Writes surface [`StorageError`] so a failed login write is
//! not mistaken for a persisted session.

use crate::storage::{KeyValueStorage, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.remove_item(key).map_err(|_| StorageError::Remove {
            key: key.to_string(),
        })
    }
}
