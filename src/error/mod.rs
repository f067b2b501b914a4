//! Unified error handling for the attendance client.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | No server response | Yes (by re-scanning) |
//! | Auth | No session / expired token | No, sign in again |
//! | Server | Server refused the request | Yes (by re-scanning) |
//! | User | Local validation failure | No |
//! | Storage | Keychain / preferences failure | No |
//!
//! None of these are fatal to the process.

mod auth;
mod category;
mod client_error;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use client_error::ClientError;

/// Type alias for Results using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
