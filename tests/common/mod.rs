//! Common test utilities for integration tests.
//!
//! Builds the attendance pipeline against a wiremock server with the real
//! reqwest adapter and in-memory storage.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use attend_ease::adapters::mock::{InMemoryCredentials, RecordingNavigator};
use attend_ease::adapters::ReqwestHttpClient;
use attend_ease::attendance::{AttendanceSubmitter, ScanPipeline};
use attend_ease::auth::{Session, SessionGuard};
use attend_ease::config::ClientConfig;
use attend_ease::scan::ScanDebouncer;

pub const TEST_TOKEN: &str = "test-token-abc";
pub const TEST_STUDENT_ID: &str = "S1";

pub fn test_session() -> Session {
    Session::new(TEST_TOKEN, TEST_STUDENT_ID)
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(base_url)
        .with_request_timeout(Duration::from_secs(2))
}

/// Everything a submission test needs to observe.
pub struct Fixture {
    pub store: Arc<InMemoryCredentials>,
    pub debouncer: Arc<ScanDebouncer>,
    pub submitter: Arc<AttendanceSubmitter>,
    pub navigator: Arc<RecordingNavigator>,
    pub pipeline: ScanPipeline,
}

pub fn fixture(config: ClientConfig, store: InMemoryCredentials) -> Fixture {
    let store = Arc::new(store);
    let guard = SessionGuard::new(store.clone());
    let debouncer = Arc::new(ScanDebouncer::new());
    let http = ReqwestHttpClient::with_timeout(config.request_timeout).unwrap();
    let submitter = Arc::new(AttendanceSubmitter::new(
        Arc::new(http),
        guard.clone(),
        debouncer.clone(),
        &config,
    ));
    let navigator = Arc::new(RecordingNavigator::new());
    let pipeline = ScanPipeline::new(
        debouncer.clone(),
        guard,
        submitter.clone(),
        navigator.clone(),
    );
    Fixture {
        store,
        debouncer,
        submitter,
        navigator,
        pipeline,
    }
}

pub fn signed_in_fixture(base_url: &str) -> Fixture {
    fixture(
        test_config(base_url),
        InMemoryCredentials::with_session(test_session()),
    )
}
