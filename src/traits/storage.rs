//! Storage trait abstractions.
//!
//! Two stores back the session: a secure store that only ever holds the
//! bearer token, and a plain ordered key-value store for the student id and
//! display fields.

use async_trait::async_trait;

/// Opaque namespace pair scoping secure storage entries.
///
/// Mirrors the Android shared-preferences file name and the iOS/macOS
/// keychain service under which the token lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecureNamespace {
    pub shared_preferences_name: String,
    pub keychain_service: String,
}

impl SecureNamespace {
    pub fn new(shared_preferences_name: impl Into<String>, keychain_service: impl Into<String>) -> Self {
        Self {
            shared_preferences_name: shared_preferences_name.into(),
            keychain_service: keychain_service.into(),
        }
    }
}

impl Default for SecureNamespace {
    fn default() -> Self {
        Self::new("mySharedPrefs", "myKeychain")
    }
}

/// Storage operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The secure store is locked (device locked, key unavailable)
    Locked,
    /// The storage medium cannot be used at all
    Unavailable(String),
    /// Failed to read a value
    ReadFailed(String),
    /// Failed to write a value
    WriteFailed(String),
    /// Failed to delete a value
    DeleteFailed(String),
    /// Encryption or decryption failed
    Crypto(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// IO error
    Io(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Locked => write!(f, "Secure storage is locked"),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::ReadFailed(msg) => write!(f, "Failed to read from storage: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Failed to write to storage: {}", msg),
            StorageError::DeleteFailed(msg) => {
                write!(f, "Failed to delete from storage: {}", msg)
            }
            StorageError::Crypto(msg) => write!(f, "Storage encryption error: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Encrypted/keychain-backed storage used only for the session token.
///
/// Implementations are scoped to a [`SecureNamespace`] at construction.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is not present.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Ordered plain key-value storage for non-sensitive fields.
#[async_trait]
pub trait PlainStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is not present.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a single value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several values in one operation.
    ///
    /// Either every entry is written or none is.
    async fn multi_set(&self, entries: &[(String, String)]) -> Result<(), StorageError>;

    /// Remove every entry.
    async fn clear(&self) -> Result<(), StorageError>;
}
