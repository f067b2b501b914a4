//! Credential store trait abstraction.
//!
//! Provides a trait-based abstraction for session persistence, enabling
//! dependency injection and mocking in tests.

use async_trait::async_trait;

use crate::auth::Session;
use crate::traits::StorageError;

/// Trait for session storage and retrieval.
///
/// Implementations include [`DeviceCredentialStore`](crate::auth::DeviceCredentialStore),
/// which splits the session across a secure and a plain store, and the
/// in-memory mock used by tests.
///
/// # Example
///
/// ```ignore
/// use attend_ease::traits::CredentialStore;
///
/// async fn signed_in<S: CredentialStore>(store: &S) -> bool {
///     store.load().await.is_some()
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored session.
    ///
    /// Returns `None` when either half of the session is missing or any
    /// underlying read fails. Never errors.
    async fn load(&self) -> Option<Session>;

    /// Persist a session.
    ///
    /// On error the caller must not assume the session was persisted, and a
    /// subsequent `load` must not return a partial session.
    async fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Delete every stored part of the session. Idempotent.
    async fn clear(&self) -> Result<(), StorageError>;
}
