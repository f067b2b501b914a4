//! Authenticated session state.

use serde::{Deserialize, Serialize};

use crate::logging::fingerprint;

/// Display fields returned at sign-in. Not needed for authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub matric_number: Option<String>,
}

/// The authenticated identity pair held by the client.
///
/// Token and student id always travel together; there is no way to hold
/// one without the other. "No session" is `Option::<Session>::None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    student_id: String,
    profile: StudentProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            student_id: student_id.into(),
            profile: StudentProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: StudentProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Build a session from separately stored halves.
    ///
    /// A missing or blank half yields `None`.
    pub fn from_parts(token: Option<String>, student_id: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.trim().is_empty())?;
        let student_id = student_id.filter(|s| !s.trim().is_empty())?;
        Some(Self::new(token, student_id))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Loggable stand-in for the token.
    pub fn token_fingerprint(&self) -> String {
        fingerprint(&self.token)
    }
}

// Hand-written so the token never lands in logs via `{:?}`.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &format_args!("<{}>", self.token_fingerprint()))
            .field("student_id", &self.student_id)
            .field("profile", &self.profile)
            .finish()
    }
}
