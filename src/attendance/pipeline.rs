//! Camera-to-navigator pipeline.
//!
//! `on_scan` is called from the camera delivery path and must not wait on the
//! network: accepted scans are submitted on a spawned task.

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::outcome::Outcome;
use super::submitter::AttendanceSubmitter;
use crate::auth::SessionGuard;
use crate::navigation::OutcomePresenter;
use crate::scan::{ScanDebouncer, ScanEvent};
use crate::traits::Navigator;

/// What happened to one scan event.
#[derive(Debug)]
pub enum ScanDisposition {
    /// Inside the cooldown window; dropped without side effects.
    Debounced,
    /// Another submission is still running; dropped.
    InFlight,
    /// No stored session; the student was sent to sign-in.
    SignInRequired,
    /// A submission task was spawned.
    Submitted(JoinHandle<Outcome>),
}

impl ScanDisposition {
    pub fn is_submitted(&self) -> bool {
        matches!(self, ScanDisposition::Submitted(_))
    }
}

pub struct ScanPipeline {
    debouncer: Arc<ScanDebouncer>,
    guard: SessionGuard,
    submitter: Arc<AttendanceSubmitter>,
    presenter: OutcomePresenter,
}

impl ScanPipeline {
    pub fn new(
        debouncer: Arc<ScanDebouncer>,
        guard: SessionGuard,
        submitter: Arc<AttendanceSubmitter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            debouncer,
            guard,
            submitter,
            presenter: OutcomePresenter::new(navigator),
        }
    }

    pub async fn on_scan(&self, event: ScanEvent) -> ScanDisposition {
        if !self.debouncer.accept(&event) {
            return ScanDisposition::Debounced;
        }

        let permit = match self.submitter.try_begin() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::debug!("Dropping scan, submission already in flight");
                return ScanDisposition::InFlight;
            }
        };

        let session = match self.guard.require_session().await {
            Ok(session) => session,
            Err(_) => {
                // Resolves without a network call and arms the cooldown.
                self.submitter
                    .submit_with_permit(permit, &event.payload, None)
                    .await;
                self.presenter.require_sign_in();
                return ScanDisposition::SignInRequired;
            }
        };

        let submitter = self.submitter.clone();
        let presenter = self.presenter.clone();
        let handle = tokio::spawn(async move {
            let outcome = submitter
                .submit_with_permit(permit, &event.payload, Some(&session))
                .await;
            presenter.present(&outcome);
            outcome
        });
        ScanDisposition::Submitted(handle)
    }

    /// Mark the scan screen as shown or left.
    ///
    /// While inactive, outcomes still resolve and arm the cooldown but are
    /// not sent to the navigator.
    pub fn set_presenter_active(&self, active: bool) {
        self.presenter.set_active(active);
    }

    pub fn submitter(&self) -> &Arc<AttendanceSubmitter> {
        &self.submitter
    }
}
