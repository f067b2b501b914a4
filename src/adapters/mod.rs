//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters that implement the traits
//! defined in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`EncryptedFileStore`] - AES-GCM encrypted file storage for the token
//! - `KeychainStore` - macOS Keychain storage for the token (macOS only)
//! - [`JsonFileStore`] - JSON file storage for identity fields
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryCredentials`] - In-memory session storage
//! - [`mock::InMemorySecureStore`] / [`mock::InMemoryPlainStore`] - In-memory storage halves
//! - [`mock::RecordingNavigator`] - Records navigation calls

pub mod encrypted_store;
pub mod file_store;
#[cfg(target_os = "macos")]
pub mod keychain_store;
pub mod mock;
pub mod reqwest_http;

pub use encrypted_store::EncryptedFileStore;
pub use file_store::JsonFileStore;
#[cfg(target_os = "macos")]
pub use keychain_store::KeychainStore;
pub use reqwest_http::ReqwestHttpClient;
