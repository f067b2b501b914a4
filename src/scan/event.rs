//! Camera scan events.

use tokio::time::Instant;

/// One decoded QR code as delivered by the camera.
///
/// Ephemeral: consumed by the debouncer and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub payload: String,
    pub observed_at: Instant,
}

impl ScanEvent {
    /// Event observed now.
    pub fn new(payload: impl Into<String>) -> Self {
        Self::at(payload, Instant::now())
    }

    pub fn at(payload: impl Into<String>, observed_at: Instant) -> Self {
        Self {
            payload: payload.into(),
            observed_at,
        }
    }
}
