//! In-memory credential store with failure injection.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use lexyvoz_client::CredentialStore;
use lexyvoz_core::AuthError;

#[derive(Default)]
struct Inner {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory [`CredentialStore`] for simulation.
///
/// Clones share the same underlying map, so a test can keep a handle
/// while the driver owns another. Reads and writes can be made to fail
/// to simulate an unavailable secure store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an entry.
    pub fn seed(&self, key: &str, value: &str) {
        self.locked().entries.insert(key.to_owned(), value.to_owned());
    }

    /// Make subsequent reads fail with a storage error.
    pub fn fail_reads(&self, fail: bool) {
        self.locked().fail_reads = fail;
    }

    /// Make subsequent writes and deletes fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.locked().fail_writes = fail;
    }

    /// Current value for a key, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.locked().entries.get(key).cloned()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let inner = self.locked();
        if inner.fail_reads {
            return Err(AuthError::Storage { reason: "simulated read failure".into() });
        }
        Ok(inner.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut inner = self.locked();
        if inner.fail_writes {
            return Err(AuthError::Storage { reason: "simulated write failure".into() });
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        let mut inner = self.locked();
        if inner.fail_writes {
            return Err(AuthError::Storage { reason: "simulated write failure".into() });
        }
        inner.entries.remove(key);
        Ok(())
    }
}
