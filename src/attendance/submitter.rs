//! Attendance submission state machine.
//!
//! ```text
//! Idle ──try_begin──▶ Submitting ──response/timeout──▶ {Success, DuplicateMark,
//!   ▲                                                   Rejected, SessionExpired,
//!   └──────────────── cooldown elapsed ◀──────────────── Unreachable}
//! ```
//!
//! The in-flight flag is held by an [`InFlightPermit`] from the moment a
//! submission starts until its outcome is known and the cooldown is armed.
//! The permit clears the flag on drop, so an abandoned submission can never
//! wedge the scanner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

use super::outcome::{
    Outcome, SubmissionAttempt, DUPLICATE_FALLBACK, REJECTED_FALLBACK, SUCCESS_FALLBACK,
    UNREACHABLE_MESSAGE,
};
use crate::api::{bearer_headers, failure_message, post_with_timeout, ResponseClassification};
use crate::auth::{Session, SessionGuard};
use crate::config::{endpoints, ClientConfig};
use crate::scan::ScanDebouncer;
use crate::traits::HttpClient;

/// Statuses whose `error` text is shown verbatim as a rejection.
const DOCUMENTED_REJECTIONS: [u16; 4] = [400, 403, 404, 500];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submission's round trip has not finished.
    #[error("A submission is already in flight")]
    InFlight,
}

/// Observable phase of the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// An outcome was reached; scans are suppressed for `remaining`.
    CoolingDown { remaining: Duration },
}

/// Cooldown length per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub window: Duration,
    /// Replaces `window` after `Rejected` and `Unreachable` when set.
    pub retry_window: Option<Duration>,
}

impl CooldownPolicy {
    pub fn uniform(window: Duration) -> Self {
        Self {
            window,
            retry_window: None,
        }
    }

    pub fn window_for(&self, outcome: &Outcome) -> Duration {
        match outcome {
            Outcome::Rejected { .. } | Outcome::Unreachable { .. } => {
                self.retry_window.unwrap_or(self.window)
            }
            _ => self.window,
        }
    }
}

impl From<&ClientConfig> for CooldownPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            window: config.scan_cooldown,
            retry_window: config.rejected_cooldown,
        }
    }
}

/// Exclusive right to run one submission. Clears the in-flight flag on drop.
#[derive(Debug)]
pub struct InFlightPermit {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct AttendanceSubmitter {
    http: Arc<dyn HttpClient>,
    guard: SessionGuard,
    debouncer: Arc<ScanDebouncer>,
    url: String,
    timeout: Duration,
    cooldown: CooldownPolicy,
    in_flight: Arc<AtomicBool>,
}

impl AttendanceSubmitter {
    pub fn new(
        http: Arc<dyn HttpClient>,
        guard: SessionGuard,
        debouncer: Arc<ScanDebouncer>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            http,
            guard,
            debouncer,
            url: config.url(endpoints::MARK_ATTENDANCE),
            timeout: config.request_timeout,
            cooldown: CooldownPolicy::from(config),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enter `Submitting`, or fail if a submission is already running.
    pub fn try_begin(&self) -> Result<InFlightPermit, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightPermit {
                flag: self.in_flight.clone(),
            })
            .map_err(|_| SubmitError::InFlight)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn state(&self) -> SubmissionState {
        if self.is_in_flight() {
            return SubmissionState::Submitting;
        }
        match self.debouncer.remaining(Instant::now()) {
            Some(remaining) => SubmissionState::CoolingDown { remaining },
            None => SubmissionState::Idle,
        }
    }

    /// Submit a scanned payload.
    ///
    /// Rejected with [`SubmitError::InFlight`] (and no network call) while
    /// another submission is running. Otherwise always yields an outcome.
    pub async fn submit(
        &self,
        scan_payload: &str,
        session: Option<&Session>,
    ) -> Result<Outcome, SubmitError> {
        let permit = self.try_begin()?;
        Ok(self.submit_with_permit(permit, scan_payload, session).await)
    }

    /// Run a submission under a permit obtained from [`try_begin`](Self::try_begin)
    /// on this submitter.
    pub async fn submit_with_permit(
        &self,
        permit: InFlightPermit,
        scan_payload: &str,
        session: Option<&Session>,
    ) -> Outcome {
        let outcome = match session {
            Some(session) => self.attempt(scan_payload, session).await,
            None => {
                tracing::info!("Submission without a session, skipping network call");
                Outcome::SessionExpired
            }
        };

        // Arm before releasing the flag so no scan slips between the two.
        self.debouncer
            .arm(Instant::now(), self.cooldown.window_for(&outcome));
        drop(permit);
        outcome
    }

    async fn attempt(&self, scan_payload: &str, session: &Session) -> Outcome {
        let attempt = SubmissionAttempt::new(scan_payload, session.student_id());
        let started = Instant::now();
        tracing::info!(
            attempt_id = %attempt.id,
            class_session_id = %attempt.class_session_id,
            "Submitting attendance for student {}",
            attempt.student_id
        );

        let body = match serde_json::to_string(&attempt.body()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(attempt_id = %attempt.id, "Failed to encode request: {}", e);
                return Outcome::Rejected {
                    message: REJECTED_FALLBACK.to_string(),
                };
            }
        };

        let result = post_with_timeout(
            self.http.as_ref(),
            &self.url,
            &body,
            &bearer_headers(session),
            self.timeout,
        )
        .await;
        let outcome = self
            .classify(ResponseClassification::from_result(result))
            .await;

        tracing::info!(
            attempt_id = %attempt.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Attendance submission finished: {}",
            outcome.kind()
        );
        outcome
    }

    async fn classify(&self, classification: ResponseClassification) -> Outcome {
        match classification {
            ResponseClassification::Success { message, .. } => Outcome::Success {
                message: message.unwrap_or_else(|| SUCCESS_FALLBACK.to_string()),
            },
            ResponseClassification::Conflict { error } => Outcome::DuplicateMark {
                message: error.unwrap_or_else(|| DUPLICATE_FALLBACK.to_string()),
            },
            ResponseClassification::Unauthorized { .. } => {
                self.guard.invalidate().await;
                Outcome::SessionExpired
            }
            ResponseClassification::Failure { status, error } => Outcome::Rejected {
                message: failure_message(status, error, &DOCUMENTED_REJECTIONS, REJECTED_FALLBACK),
            },
            ResponseClassification::NoResponse { reason } => {
                tracing::warn!("Attendance server unreachable: {}", reason);
                Outcome::Unreachable {
                    message: UNREACHABLE_MESSAGE.to_string(),
                }
            }
        }
    }
}
