//! # Session store: the only owner of the persisted auth state
//!
//! A [`Session`] is the pair `(token, user)` kept across page loads under two
//! storage keys, [`TOKEN_KEY`] and [`USER_KEY`]. [`SessionStore`] is the single
//! component allowed to read or write those keys; everything else receives a
//! [`Session`] snapshot.
//!
//! ## Trust rule
//!
//! The cached user is only meaningful next to a token. [`Session::is_authenticated`]
//! looks at the token alone, so a stale user record left behind without a token
//! never counts as signed in.
//!
//! ## Write ordering
//!
//! | Operation | Order | Why it matters |
//! |-----------|-------|----------------|
//! | [`set`](SessionStore::set) | user, then token | a token never exists without its user |
//! | [`clear`](SessionStore::clear) | token, then user | the first removal already signs the session out |
//!
//! A corrupt user record (unparseable JSON) reads back as `None` and is logged.

use serde::{Deserialize, Serialize};

use crate::models::{Role, User};
use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON-encoded cached [`User`].
pub const USER_KEY: &str = "user";

/// Snapshot of the persisted session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Role of the cached user, trusted or not.
    pub fn cached_role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.cached_role() == Some(Role::Admin)
    }
}

/// Reads and writes the [`Session`] through a [`KeyValueStorage`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Session {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable cached user: {}", e);
                    None
                }
            });
        Session { token, user }
    }

    /// Bearer token only, for request signing.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Write whichever parts are given; `None` leaves that key untouched.
    ///
    /// When both are given and the token write fails, the user written here is
    /// removed again so no cached user is left without its token.
    pub fn set(&self, token: Option<&str>, user: Option<&User>) -> Result<(), StorageError> {
        if let Some(user) = user {
            let encoded = serde_json::to_string(user)?;
            self.storage.set(USER_KEY, &encoded)?;
        }
        if let Some(token) = token {
            if let Err(e) = self.storage.set(TOKEN_KEY, token) {
                if user.is_some() {
                    if let Err(undo) = self.storage.remove(USER_KEY) {
                        tracing::error!("Could not roll back cached user: {}", undo);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove both keys.
    ///
    /// If the token cannot be removed the user is left alone too, so callers
    /// never observe a cached user cleared under a live token.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::models::Office;

    fn installer() -> User {
        User {
            id: 4,
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            username: "dreyes".into(),
            email: "dana@kitchensaver.test".into(),
            cell: "5551234".into(),
            role: Some(Role::Installer),
            office: Some(Office::Office400),
        }
    }

    #[test]
    fn test_empty_storage_is_signed_out() {
        let store = SessionStore::new(MemoryStorage::new());
        let session = store.get();
        assert_eq!(session, Session::default());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(Some("jwt-1"), Some(&installer())).unwrap();

        let session = store.get();
        assert!(session.is_authenticated());
        assert_eq!(session.user, Some(installer()));
        assert_eq!(session.cached_role(), Some(Role::Installer));
    }

    #[test]
    fn test_set_user_only_keeps_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(Some("jwt-1"), Some(&installer())).unwrap();

        let mut updated = installer();
        updated.cell = "5559999".into();
        store.set(None, Some(&updated)).unwrap();

        let session = store.get();
        assert_eq!(session.token.as_deref(), Some("jwt-1"));
        assert_eq!(session.user.unwrap().cell, "5559999");
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.set(Some("jwt-1"), Some(&installer())).unwrap();

        store.clear().unwrap();
        assert!(storage.is_empty());
        assert_eq!(store.get(), Session::default());
    }

    #[test]
    fn test_stale_user_without_token_is_not_authenticated() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(None, Some(&installer())).unwrap();

        let session = store.get();
        assert!(!session.is_authenticated());
        assert_eq!(session.cached_role(), Some(Role::Installer));
    }

    /// Storage whose token writes always fail.
    #[derive(Clone, Default)]
    struct TokenRejecting {
        inner: MemoryStorage,
    }

    impl KeyValueStorage for TokenRejecting {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == TOKEN_KEY {
                return Err(StorageError::Write { key: key.to_string() });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_token_write_leaves_no_cached_user() {
        let storage = TokenRejecting::default();
        let store = SessionStore::new(storage.clone());

        let result = store.set(Some("jwt-1"), Some(&installer()));
        assert!(matches!(result, Err(StorageError::Write { .. })));

        let session = store.get();
        assert_eq!(session, Session::default());
        assert_eq!(session.cached_role(), None);
        assert!(storage.inner.is_empty());
    }

    #[test]
    fn test_failed_token_write_keeps_earlier_user() {
        let storage = TokenRejecting::default();
        let store = SessionStore::new(storage.clone());
        store.set(None, Some(&installer())).unwrap();

        assert!(store.set(Some("jwt-2"), None).is_err());
        assert_eq!(store.get().user, Some(installer()));
    }

    #[test]
    fn test_corrupt_user_reads_as_none() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{not json").unwrap();
        storage.set(TOKEN_KEY, "jwt-1").unwrap();

        let session = SessionStore::new(storage).get();
        assert!(session.user.is_none());
        assert!(session.is_authenticated());
    }
}
