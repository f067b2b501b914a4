//! Session persistence split across secure and plain storage.
//!
//! The bearer token goes to the [`SecureStore`]; the student id and display
//! fields go to the [`PlainStore`]. A session only exists when both halves
//! can be read back.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::session::{Session, StudentProfile};
use crate::traits::{CredentialStore, PlainStore, SecureStore, StorageError};

/// Secure-store key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Plain-store keys.
pub const STUDENT_ID_KEY: &str = "studentId";
pub const FIRST_NAME_KEY: &str = "firstName";
pub const LAST_NAME_KEY: &str = "lastName";
pub const MATRIC_NUMBER_KEY: &str = "matricNumber";

/// Production [`CredentialStore`] built on a secure and a plain store.
pub struct DeviceCredentialStore {
    secure: Arc<dyn SecureStore>,
    plain: Arc<dyn PlainStore>,
    /// Serializes save/clear so the two never interleave.
    write_lock: Mutex<()>,
}

impl DeviceCredentialStore {
    pub fn new(secure: Arc<dyn SecureStore>, plain: Arc<dyn PlainStore>) -> Self {
        Self {
            secure,
            plain,
            write_lock: Mutex::new(()),
        }
    }

    fn plain_entries(session: &Session) -> Vec<(String, String)> {
        let profile = session.profile();
        let mut entries = vec![(STUDENT_ID_KEY.to_string(), session.student_id().to_string())];
        let optional = [
            (FIRST_NAME_KEY, &profile.first_name),
            (LAST_NAME_KEY, &profile.last_name),
            (MATRIC_NUMBER_KEY, &profile.matric_number),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                entries.push((key.to_string(), value.clone()));
            }
        }
        entries
    }

    async fn read_plain(&self, key: &str) -> Option<String> {
        match self.plain.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read '{}' from plain storage: {}", key, e);
                None
            }
        }
    }

    /// Undo a token write after the identity write failed.
    async fn rollback_token(&self) {
        if let Err(e) = self.secure.delete(AUTH_TOKEN_KEY).await {
            // load() still reports no session: the identity half is gone.
            tracing::warn!("Failed to roll back token after partial save: {}", e);
        }
    }
}

#[async_trait]
impl CredentialStore for DeviceCredentialStore {
    async fn load(&self) -> Option<Session> {
        let token = match self.secure.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Secure storage read failed, treating as signed out: {}", e);
                return None;
            }
        };
        let student_id = self.read_plain(STUDENT_ID_KEY).await;

        let session = Session::from_parts(token, student_id)?;
        let profile = StudentProfile {
            first_name: self.read_plain(FIRST_NAME_KEY).await,
            last_name: self.read_plain(LAST_NAME_KEY).await,
            matric_number: self.read_plain(MATRIC_NUMBER_KEY).await,
        };
        Some(session.with_profile(profile))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        self.secure.set(AUTH_TOKEN_KEY, session.token()).await?;

        // Drop stale identity fields from a previous session before writing.
        let written = match self.plain.clear().await {
            Ok(()) => self.plain.multi_set(&Self::plain_entries(session)).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            tracing::warn!("Identity write failed, rolling back token: {}", e);
            self.rollback_token().await;
            return Err(e);
        }

        tracing::info!(
            "Session saved for student {} (token {})",
            session.student_id(),
            session.token_fingerprint()
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        // Attempt both halves even if the first fails.
        let token_result = self.secure.delete(AUTH_TOKEN_KEY).await;
        let plain_result = self.plain.clear().await;

        token_result?;
        plain_result?;
        tracing::info!("Stored session cleared");
        Ok(())
    }
}
