//! JSON file backed plain key-value store.
//!
//! Holds the student id and display fields in `plain_store.json` under the
//! data directory. Entries are kept ordered.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::traits::{PlainStore, StorageError};

/// File name used inside the data directory.
pub const PLAIN_STORE_FILE: &str = "plain_store.json";

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `dir/plain_store.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(PLAIN_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(map)?;
        write_atomic(&self.path, &json)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

/// Read a JSON object of strings. A missing file is an empty map.
pub(crate) async fn read_json_map(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(StorageError::ReadFailed(e.to_string())),
    }
}

/// Write through a sibling temp file and rename, so readers never see a
/// half-written file.
///
/// The temp file is created owner-only (0600 on unix) before any bytes are
/// written, and the rename carries that mode to `path`.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("tmp");
    // A leftover temp file would keep its old mode.
    match tokio::fs::remove_file(&tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(&tmp).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl PlainStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(read_json_map(&self.path).await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = read_json_map(&self.path).await?;
        map.insert(key.to_string(), value.to_string());
        self.write(&map).await
    }

    async fn multi_set(&self, entries: &[(String, String)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = read_json_map(&self.path).await?;
        map.extend(entries.iter().cloned());
        // One rename covers every entry.
        self.write(&map).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }
}
