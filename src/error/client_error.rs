//! Unified error type for client operations outside the scan pipeline.
//!
//! Login, sign-up, history and logout report failures through
//! [`ClientError`]. Attendance submission never errors; it always resolves
//! to an [`Outcome`](crate::attendance::Outcome).

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use crate::traits::StorageError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server answered with a refusal; `message` is shown verbatim.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// No response reached the client.
    #[error("Server unreachable: {message}")]
    Unreachable { message: String },

    /// Input failed local validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        ClientError::Unreachable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Auth(_) => ErrorCategory::Auth,
            ClientError::Rejected { .. } => ErrorCategory::Server,
            ClientError::Unreachable { .. } => ErrorCategory::Network,
            ClientError::Validation(_) => ErrorCategory::User,
            ClientError::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// True when the caller must transition to the login screen.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Text suitable for showing to the student.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(err) => err.user_message().to_string(),
            ClientError::Rejected { message } | ClientError::Unreachable { message } => {
                message.clone()
            }
            ClientError::Validation(message) => message.clone(),
            ClientError::Storage(_) => {
                "Could not access secure storage on this device. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ClientError::from(AuthError::NoSession).category(),
            ErrorCategory::Auth
        );
        assert_eq!(ClientError::rejected("x").category(), ErrorCategory::Server);
        assert_eq!(
            ClientError::unreachable("x").category(),
            ErrorCategory::Network
        );
        assert_eq!(
            ClientError::Validation("x".to_string()).category(),
            ErrorCategory::User
        );
        assert_eq!(
            ClientError::from(StorageError::Locked).category(),
            ErrorCategory::Storage
        );
    }

    #[test]
    fn test_reauth_detection() {
        assert!(ClientError::from(AuthError::NoSession).requires_reauth());
        assert!(ClientError::from(AuthError::SessionExpired).requires_reauth());
        assert!(!ClientError::rejected("Class not found").requires_reauth());
        assert!(!ClientError::unreachable("offline").requires_reauth());
    }

    #[test]
    fn test_user_message_is_verbatim_for_server_text() {
        let err = ClientError::rejected("Invalid class session");
        assert_eq!(err.user_message(), "Invalid class session");
        assert_eq!(err.to_string(), "Request rejected: Invalid class session");
    }

    #[test]
    fn test_transparent_display() {
        let err: ClientError = StorageError::Locked.into();
        assert_eq!(err.to_string(), "Secure storage is locked");
    }
}
