//! In-memory secure and plain stores for testing.
//!
//! Both expose failure switches so tests can drive the partial-write and
//! locked-store paths of the credential store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::traits::{PlainStore, SecureStore, StorageError};

/// In-memory [`SecureStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySecureStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    locked: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
    delete_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a locked keychain: every operation fails with `Locked`.
    pub fn set_locked(&self, locked: bool) {
        *self.locked.lock().unwrap() = locked;
    }

    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_delete_should_fail(&self, should_fail: bool) {
        *self.delete_should_fail.lock().unwrap() = should_fail;
    }

    fn check_unlocked(&self) -> Result<(), StorageError> {
        if *self.locked.lock().unwrap() {
            return Err(StorageError::Locked);
        }
        Ok(())
    }
}

#[async_trait]
impl SecureStore for InMemorySecureStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_unlocked()?;
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_unlocked()?;
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed("Mock secure write failure".to_string()));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check_unlocked()?;
        if *self.delete_should_fail.lock().unwrap() {
            return Err(StorageError::DeleteFailed("Mock secure delete failure".to_string()));
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory [`PlainStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlainStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryPlainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Make `set` and `multi_set` fail. `clear` still succeeds.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.lock().unwrap().clone()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed("Mock plain write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlainStore for InMemoryPlainStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StorageError::ReadFailed("Mock plain read failure".to_string()));
        }
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_set(&self, entries: &[(String, String)]) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut values = self.values.lock().unwrap();
        for (key, value) in entries {
            values.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.values.lock().unwrap().clear();
        Ok(())
    }
}
