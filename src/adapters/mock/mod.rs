//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network dependencies or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable, delayable responses
//! - [`InMemoryCredentials`] - In-memory session store with call counters
//! - [`InMemorySecureStore`] / [`InMemoryPlainStore`] - Storage halves with failure switches
//! - [`RecordingNavigator`] - Navigator that records routes

pub mod credentials;
pub mod http;
pub mod navigator;
pub mod storage;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use navigator::{NavigationEvent, RecordingNavigator};
pub use storage::{InMemoryPlainStore, InMemorySecureStore};
