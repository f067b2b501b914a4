//! AES-256-GCM encrypted file store for the session token.
//!
//! Values are stored as `base64(nonce || ciphertext || tag)` in a JSON vault
//! next to a per-namespace key file. The key file is created on first write
//! with owner-only permissions. If it exists but cannot be read or decoded,
//! the store reports [`StorageError::Locked`].

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::file_store::{read_json_map, write_atomic};
use crate::traits::{SecureNamespace, SecureStore, StorageError};

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

pub struct EncryptedFileStore {
    key_path: PathBuf,
    vault_path: PathBuf,
    /// Serializes read-modify-write of the vault.
    lock: Mutex<()>,
}

impl EncryptedFileStore {
    /// Store under `dir`, with file names taken from the namespace.
    pub fn new(dir: impl AsRef<Path>, namespace: &SecureNamespace) -> Self {
        let dir = dir.as_ref();
        let stem = &namespace.shared_preferences_name;
        Self {
            key_path: dir.join(format!("{}.key", stem)),
            vault_path: dir.join(format!("{}.vault.json", stem)),
            lock: Mutex::new(()),
        }
    }

    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Read the key. `Ok(None)` if it was never created.
    async fn read_key(&self) -> Result<Option<[u8; KEY_LEN]>, StorageError> {
        let encoded = match tokio::fs::read_to_string(&self.key_path).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!("Token key unreadable: {}", e);
                return Err(StorageError::Locked);
            }
        };

        let bytes = hex::decode(encoded.trim()).map_err(|_| StorageError::Locked)?;
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| StorageError::Locked)?;
        Ok(Some(key))
    }

    async fn read_or_create_key(&self) -> Result<[u8; KEY_LEN], StorageError> {
        if let Some(key) = self.read_key().await? {
            return Ok(key);
        }

        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        write_atomic(&self.key_path, hex::encode(key).as_bytes()).await?;
        tracing::info!("Created token key at {}", self.key_path.display());
        Ok(key)
    }

    async fn read_vault(&self) -> Result<BTreeMap<String, String>, StorageError> {
        read_json_map(&self.vault_path).await
    }

    async fn write_vault(&self, vault: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(vault)?;
        write_atomic(&self.vault_path, &json).await
    }
}

fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<String, StorageError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| StorageError::Crypto(format!("AES-GCM encrypt: {e}")))?;

    let mut combined = nonce_bytes.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(combined))
}

fn decrypt(key: &[u8; KEY_LEN], encoded: &str) -> Result<Vec<u8>, StorageError> {
    let combined = STANDARD
        .decode(encoded)
        .map_err(|e| StorageError::Crypto(format!("base64 decode: {e}")))?;

    if combined.len() <= NONCE_LEN {
        return Err(StorageError::Crypto("ciphertext too short".into()));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|e| StorageError::Crypto(format!("AES-GCM decrypt: {e}")))
}

#[async_trait]
impl SecureStore for EncryptedFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;

        let Some(secret) = self.read_key().await? else {
            return Ok(None);
        };
        let vault = self.read_vault().await?;
        let Some(encoded) = vault.get(key) else {
            return Ok(None);
        };

        let plaintext = decrypt(&secret, encoded)?;
        String::from_utf8(plaintext)
            .map(Some)
            .map_err(|e| StorageError::Crypto(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let secret = self.read_or_create_key().await?;
        let mut vault = self.read_vault().await?;
        vault.insert(key.to_string(), encrypt(&secret, value.as_bytes())?);
        self.write_vault(&vault).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut vault = self.read_vault().await?;
        if vault.remove(key).is_some() {
            self.write_vault(&vault).await?;
        }
        Ok(())
    }
}
