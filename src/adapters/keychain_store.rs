//! macOS Keychain backed secure store.
//!
//! Each value is a generic password with service = the namespace's
//! keychain service and account = the key.

use async_trait::async_trait;
use security_framework::passwords::{
    delete_generic_password, get_generic_password, set_generic_password,
};

use crate::traits::{SecureNamespace, SecureStore, StorageError};

/// `errSecItemNotFound`
const ERR_ITEM_NOT_FOUND: i32 = -25300;
/// `errSecInteractionNotAllowed`, returned while the keychain is locked.
const ERR_INTERACTION_NOT_ALLOWED: i32 = -25308;

#[derive(Debug, Clone)]
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new(namespace: &SecureNamespace) -> Self {
        Self {
            service: namespace.keychain_service.clone(),
        }
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(String) -> Result<T, StorageError> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || op(service))
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
    }
}

fn classify(err: security_framework::base::Error, fallback: fn(String) -> StorageError) -> StorageError {
    match err.code() {
        ERR_INTERACTION_NOT_ALLOWED => StorageError::Locked,
        _ => fallback(err.to_string()),
    }
}

#[async_trait]
impl SecureStore for KeychainStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let account = key.to_string();
        self.blocking(move |service| match get_generic_password(&service, &account) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::ReadFailed(e.to_string())),
            Err(e) if e.code() == ERR_ITEM_NOT_FOUND => Ok(None),
            Err(e) => Err(classify(e, StorageError::ReadFailed)),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let account = key.to_string();
        let value = value.to_string();
        self.blocking(move |service| {
            set_generic_password(&service, &account, value.as_bytes())
                .map_err(|e| classify(e, StorageError::WriteFailed))
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let account = key.to_string();
        self.blocking(move |service| match delete_generic_password(&service, &account) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ERR_ITEM_NOT_FOUND => Ok(()),
            Err(e) => Err(classify(e, StorageError::DeleteFailed)),
        })
        .await
    }
}
