//! Integration tests for session persistence on disk.

use std::sync::Arc;

use attend_ease::adapters::{EncryptedFileStore, JsonFileStore};
use attend_ease::auth::{DeviceCredentialStore, Session, StudentProfile};
use attend_ease::traits::{CredentialStore, SecureNamespace};
use tempfile::TempDir;

fn device_store(dir: &TempDir) -> DeviceCredentialStore {
    DeviceCredentialStore::new(
        Arc::new(EncryptedFileStore::new(dir.path(), &SecureNamespace::default())),
        Arc::new(JsonFileStore::in_dir(dir.path())),
    )
}

fn session() -> Session {
    Session::new("abc", "S1").with_profile(StudentProfile {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        matric_number: Some("M-001".into()),
    })
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    device_store(&dir).save(&session()).await.unwrap();

    let reopened = device_store(&dir);
    assert_eq!(reopened.load().await, Some(session()));
}

#[tokio::test]
async fn test_token_is_not_in_plain_storage() {
    let dir = TempDir::new().unwrap();
    device_store(&dir).save(&session()).await.unwrap();

    let plain = std::fs::read_to_string(dir.path().join("plain_store.json")).unwrap();
    assert!(plain.contains("S1"));
    assert!(!plain.contains("abc"));
}

#[tokio::test]
async fn test_clear_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = device_store(&dir);
    store.save(&session()).await.unwrap();

    store.clear().await.unwrap();
    store.clear().await.unwrap();
    assert!(store.load().await.is_none());
    assert!(device_store(&dir).load().await.is_none());
}

#[tokio::test]
async fn test_unreadable_key_loads_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let store = device_store(&dir);
    store.save(&session()).await.unwrap();

    std::fs::write(dir.path().join("mySharedPrefs.key"), "garbage").unwrap();
    assert!(store.load().await.is_none());
    assert!(store.save(&session()).await.is_err());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let dir = TempDir::new().unwrap();
    device_store(&dir).save(&session()).await.unwrap();

    let other = DeviceCredentialStore::new(
        Arc::new(EncryptedFileStore::new(
            dir.path(),
            &SecureNamespace::new("otherPrefs", "otherKeychain"),
        )),
        Arc::new(JsonFileStore::in_dir(dir.path())),
    );
    assert!(other.load().await.is_none());
}
