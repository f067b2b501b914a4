//! Attendance submission, scan pipeline and history.

pub mod history;
mod outcome;
pub mod pipeline;
pub mod submitter;

pub use history::{newest_first, AttendanceRecord, HistoryClient};
pub use outcome::{
    MarkAttendanceBody, Outcome, SubmissionAttempt, DUPLICATE_FALLBACK, REJECTED_FALLBACK,
    SUCCESS_FALLBACK, UNREACHABLE_MESSAGE,
};
pub use pipeline::{ScanDisposition, ScanPipeline};
pub use submitter::{
    AttendanceSubmitter, CooldownPolicy, InFlightPermit, SubmissionState, SubmitError,
};
