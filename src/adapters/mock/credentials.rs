//! In-memory credential store for testing.
//!
//! Keeps the session in memory and counts calls, so tests can assert that a
//! 401 clears credentials exactly once.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::auth::Session;
use crate::traits::{CredentialStore, StorageError};

/// In-memory credential store for testing.
///
/// # Example
///
/// ```ignore
/// use attend_ease::adapters::mock::InMemoryCredentials;
/// use attend_ease::auth::Session;
/// use attend_ease::traits::CredentialStore;
///
/// let store = InMemoryCredentials::with_session(Session::new("abc", "S1"));
/// store.clear().await?;
/// assert!(store.load().await.is_none());
/// assert_eq!(store.clear_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    /// Stored session
    session: Arc<Mutex<Option<Session>>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
    save_calls: Arc<AtomicUsize>,
    clear_calls: Arc<AtomicUsize>,
}

impl InMemoryCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `session`.
    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        *store.session.lock().unwrap() = Some(session);
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Current session, read synchronously.
    pub fn session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn load(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if *self.save_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed("Mock save failure".to_string()));
        }

        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if *self.clear_should_fail.lock().unwrap() {
            return Err(StorageError::DeleteFailed("Mock clear failure".to_string()));
        }

        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
