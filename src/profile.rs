//! Profile screen data and logout.

use std::sync::Arc;

use crate::auth::credentials::{FIRST_NAME_KEY, LAST_NAME_KEY, MATRIC_NUMBER_KEY};
use crate::auth::SessionGuard;
use crate::error::ClientResult;
use crate::traits::PlainStore;

/// Placeholder for a field that could not be read.
pub const NOT_FOUND: &str = "Not found";

/// Shown when logout fails.
pub const LOGOUT_FAILED_MESSAGE: &str = "There was an error logging out. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub first_name: String,
    pub last_name: String,
    pub matric_number: String,
}

pub struct ProfileService {
    plain: Arc<dyn PlainStore>,
    guard: SessionGuard,
}

impl ProfileService {
    pub fn new(plain: Arc<dyn PlainStore>, guard: SessionGuard) -> Self {
        Self { plain, guard }
    }

    /// Display fields saved at sign-in.
    ///
    /// Fails with [`AuthError::NoSession`](crate::error::AuthError::NoSession)
    /// when signed out, without reading any field. With a session, a field
    /// that is missing or unreadable shows [`NOT_FOUND`].
    pub async fn profile(&self) -> ClientResult<ProfileView> {
        self.guard.require_session().await?;
        Ok(ProfileView {
            first_name: self.field(FIRST_NAME_KEY).await,
            last_name: self.field(LAST_NAME_KEY).await,
            matric_number: self.field(MATRIC_NUMBER_KEY).await,
        })
    }

    /// Clear the stored session.
    ///
    /// On error, show [`LOGOUT_FAILED_MESSAGE`] and stay on the profile screen.
    pub async fn logout(&self) -> ClientResult<()> {
        self.guard.store().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn field(&self, key: &str) -> String {
        match self.plain.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => NOT_FOUND.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read profile field '{}': {}", key, e);
                NOT_FOUND.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, InMemoryPlainStore};
    use crate::auth::Session;
    use crate::error::{AuthError, ClientError};

    fn signed_in() -> SessionGuard {
        SessionGuard::new(Arc::new(InMemoryCredentials::with_session(Session::new(
            "abc", "S1",
        ))))
    }

    #[tokio::test]
    async fn test_profile_reads_fields() {
        let plain = Arc::new(InMemoryPlainStore::new());
        plain.set(FIRST_NAME_KEY, "Ada").await.unwrap();
        plain.set(MATRIC_NUMBER_KEY, "M-001").await.unwrap();
        let service = ProfileService::new(plain, signed_in());

        let view = service.profile().await.unwrap();
        assert_eq!(view.first_name, "Ada");
        assert_eq!(view.last_name, NOT_FOUND);
        assert_eq!(view.matric_number, "M-001");
    }

    #[tokio::test]
    async fn test_profile_without_session_requires_sign_in() {
        let plain = Arc::new(InMemoryPlainStore::new());
        plain.set(FIRST_NAME_KEY, "Stale").await.unwrap();
        let service = ProfileService::new(
            plain,
            SessionGuard::new(Arc::new(InMemoryCredentials::new())),
        );

        let err = service.profile().await.unwrap_err();
        assert_eq!(err, ClientError::Auth(AuthError::NoSession));
        assert!(err.requires_reauth());
    }

    #[tokio::test]
    async fn test_profile_read_errors_become_not_found() {
        let plain = Arc::new(InMemoryPlainStore::new());
        plain.set(FIRST_NAME_KEY, "Ada").await.unwrap();
        plain.set_read_should_fail(true);
        let service = ProfileService::new(plain, signed_in());

        assert_eq!(service.profile().await.unwrap().first_name, NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let store = Arc::new(InMemoryCredentials::with_session(Session::new("abc", "S1")));
        let service = ProfileService::new(
            Arc::new(InMemoryPlainStore::new()),
            SessionGuard::new(store.clone()),
        );

        service.logout().await.unwrap();
        assert!(store.session().is_none());
        assert_eq!(store.clear_count(), 1);
        assert!(service.profile().await.is_err());
    }

    #[tokio::test]
    async fn test_logout_failure_is_reported() {
        let store = Arc::new(InMemoryCredentials::with_session(Session::new("abc", "S1")));
        store.set_clear_should_fail(true);
        let service = ProfileService::new(
            Arc::new(InMemoryPlainStore::new()),
            SessionGuard::new(store),
        );

        let err = service.logout().await.unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
    }
}
