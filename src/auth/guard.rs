//! Session guard for authenticated operations.
//!
//! Every authenticated call starts with [`SessionGuard::require_session`].
//! A missing session short-circuits to re-authentication before any network
//! traffic; an unauthorized response ends in [`SessionGuard::invalidate`].

use std::sync::Arc;

use crate::error::AuthError;
use crate::traits::CredentialStore;

use super::session::Session;

#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn CredentialStore>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Load the current session or fail with [`AuthError::NoSession`].
    pub async fn require_session(&self) -> Result<Session, AuthError> {
        match self.store.load().await {
            Some(session) => Ok(session),
            None => {
                tracing::info!("No stored session, re-authentication required");
                Err(AuthError::NoSession)
            }
        }
    }

    /// Handle a server-side authentication rejection.
    ///
    /// Clears stored credentials and returns [`AuthError::SessionExpired`]. A
    /// failure to clear is logged; the caller still goes back to login.
    pub async fn invalidate(&self) -> AuthError {
        tracing::warn!("Server rejected the stored token, clearing credentials");
        if let Err(e) = self.store.clear().await {
            tracing::warn!("Failed to clear credentials after rejection: {}", e);
        }
        AuthError::SessionExpired
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryCredentials;

    #[tokio::test]
    async fn test_require_session_without_credentials() {
        let store = Arc::new(InMemoryCredentials::new());
        let guard = SessionGuard::new(store);
        assert_eq!(guard.require_session().await, Err(AuthError::NoSession));
    }

    #[tokio::test]
    async fn test_require_session_returns_stored_session() {
        let session = Session::new("abc", "S1");
        let store = Arc::new(InMemoryCredentials::with_session(session.clone()));
        let guard = SessionGuard::new(store);
        assert_eq!(guard.require_session().await, Ok(session));
    }

    #[tokio::test]
    async fn test_invalidate_clears_once() {
        let store = Arc::new(InMemoryCredentials::with_session(Session::new("abc", "S1")));
        let guard = SessionGuard::new(store.clone());

        assert_eq!(guard.invalidate().await, AuthError::SessionExpired);
        assert_eq!(store.clear_count(), 1);
        assert!(store.session().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_survives_clear_failure() {
        let store = Arc::new(InMemoryCredentials::with_session(Session::new("abc", "S1")));
        store.set_clear_should_fail(true);
        let guard = SessionGuard::new(store.clone());

        assert_eq!(guard.invalidate().await, AuthError::SessionExpired);
        assert_eq!(store.clear_count(), 1);
    }
}
