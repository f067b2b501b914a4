//! Trait abstractions for dependency injection and testability.
//!
//! Every collaborator the attendance core talks to sits behind one of
//! these traits, so the pipeline can be exercised without a camera, a
//! keychain or a network.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP POST requests
//! - [`SecureStore`] - Token storage (keychain / encrypted file)
//! - [`PlainStore`] - Ordered key-value storage for identity fields
//! - [`CredentialStore`] - Session persistence built on the two stores
//! - [`Navigator`] - Screen transitions

pub mod credentials;
pub mod http;
pub mod navigation;
pub mod storage;

pub use credentials::CredentialStore;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use navigation::Navigator;
pub use storage::{PlainStore, SecureNamespace, SecureStore, StorageError};
