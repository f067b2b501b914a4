//! Submission outcomes and the request that produces them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Shown when a 2xx response carries no `message`.
pub const SUCCESS_FALLBACK: &str = "Attendance marked successfully";
/// Shown when a 409 response carries no `error`.
pub const DUPLICATE_FALLBACK: &str = "You have already marked attendance for this class";
/// Shown for undocumented statuses or documented ones without an `error`.
pub const REJECTED_FALLBACK: &str = "An unexpected error occurred";
/// Shown when no response reached the client.
pub const UNREACHABLE_MESSAGE: &str = "An unknown error occurred!";

/// The closed result of one attendance submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { message: String },
    DuplicateMark { message: String },
    /// Validation, not-found or server error; the student may re-scan.
    Rejected { message: String },
    /// Stored credentials are gone; the student must sign in again.
    SessionExpired,
    /// No server response; the student may re-scan.
    Unreachable { message: String },
}

impl Outcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { message }
            | Outcome::DuplicateMark { message }
            | Outcome::Rejected { message }
            | Outcome::Unreachable { message } => Some(message),
            Outcome::SessionExpired => None,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::DuplicateMark { .. } => "duplicate",
            Outcome::Rejected { .. } => "rejected",
            Outcome::SessionExpired => "session_expired",
            Outcome::Unreachable { .. } => "unreachable",
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(self, Outcome::SessionExpired)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.kind(), message),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// One attendance claim, alive for a single round trip.
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    pub id: Uuid,
    pub class_session_id: String,
    pub student_id: String,
    pub issued_at: DateTime<Utc>,
}

/// Wire body of `POST /student/mark-attendance`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceBody<'a> {
    pub class_session_id: &'a str,
    pub student_id: &'a str,
}

impl SubmissionAttempt {
    /// The scanned payload is used verbatim as the class session id.
    pub fn new(scan_payload: &str, student_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_session_id: scan_payload.to_string(),
            student_id: student_id.to_string(),
            issued_at: Utc::now(),
        }
    }

    pub fn body(&self) -> MarkAttendanceBody<'_> {
        MarkAttendanceBody {
            class_session_id: &self.class_session_id,
            student_id: &self.student_id,
        }
    }
}
