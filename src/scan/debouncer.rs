//! Debouncing of camera scan events.
//!
//! The camera emits many events per second for the same code. The debouncer
//! holds a single cooldown deadline; it is armed by the submission pipeline
//! once an outcome is reached, never by `accept` itself.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use super::event::ScanEvent;

#[derive(Debug, Default)]
pub struct ScanDebouncer {
    cooldown_until: Mutex<Option<Instant>>,
}

impl ScanDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit the event if no cooldown is pending at `event.observed_at`.
    ///
    /// A dropped event has no side effects.
    pub fn accept(&self, event: &ScanEvent) -> bool {
        let cooldown_until = *self.lock();
        match cooldown_until {
            Some(until) if event.observed_at < until => {
                tracing::debug!(
                    "Dropping scan, cooldown has {:?} left",
                    until - event.observed_at
                );
                false
            }
            _ => true,
        }
    }

    /// Suppress scans until `now + window`.
    pub fn arm(&self, now: Instant, window: Duration) {
        let until = now + window;
        *self.lock() = Some(until);
        tracing::debug!("Scan cooldown armed for {:?}", window);
    }

    /// Deadline of the current cooldown, if one was armed.
    pub fn cooldown_until(&self) -> Option<Instant> {
        *self.lock()
    }

    /// Time left in the cooldown relative to `now`.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.cooldown_until()
            .filter(|until| *until > now)
            .map(|until| until - now)
    }

    pub fn reset(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        // The guarded value is a plain Option; a poisoned lock still holds a valid one.
        self.cooldown_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
