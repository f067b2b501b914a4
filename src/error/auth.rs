//! Authentication-related error types.

use thiserror::Error;

/// Authentication failures that send the student back to the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No usable session is stored (missing token, missing student id, or
    /// unreadable secure storage).
    #[error("No stored session")]
    NoSession,

    /// The server rejected the stored token; credentials have been cleared.
    #[error("Session expired")]
    SessionExpired,
}

impl AuthError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::NoSession => "You are not signed in. Please sign in to continue.",
            AuthError::SessionExpired => "Your session has expired!",
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NoSession => "E_AUTH_NO_SESSION",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::NoSession.to_string(), "No stored session");
        assert_eq!(AuthError::SessionExpired.to_string(), "Session expired");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        assert_ne!(
            AuthError::NoSession.error_code(),
            AuthError::SessionExpired.error_code()
        );
    }
}
