//! # Key/value storage: the persistence seam under the session
//!
//! [`KeyValueStorage`] is the narrow interface the [`crate::SessionStore`] writes
//! through. It mirrors the browser's `localStorage`: string keys, string values,
//! synchronous access. Implementations live in sibling modules:
//!
//! | Backend | Module | Used by |
//! |---------|--------|---------|
//! | [`crate::MemoryStorage`] | `memory` | Tests and native builds |
//! | `LocalStorage` | `local` (WASM + `web` feature) | The browser build |
//!
//! Reads never fail: an unavailable backend simply has no data. Writes report a
//! [`StorageError`] so the caller can decide whether a half-written session is
//! acceptable (it never is for the session store).

/// Errors raised while writing to a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write `{key}` to storage")]
    Write { key: String },
    #[error("failed to remove `{key}` from storage")]
    Remove { key: String },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Synchronous string key/value storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
