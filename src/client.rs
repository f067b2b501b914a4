//! Client wiring with dependency injection.
//!
//! [`AttendEaseClient::from_config`] assembles the production adapters;
//! [`AttendEaseClient::with_parts`] accepts any implementations, which is how
//! the tests build it.
//!
//! # Usage
//!
//! ```ignore
//! use attend_ease::{AttendEaseClient, ClientConfig};
//!
//! attend_ease::logging::init_tracing();
//! let client = AttendEaseClient::from_config(ClientConfig::from_env(), navigator)?;
//! let route = client.initial_route().await;
//! ```

use std::sync::Arc;

use crate::adapters::{JsonFileStore, ReqwestHttpClient};
use crate::attendance::{AttendanceSubmitter, HistoryClient, ScanDisposition, ScanPipeline};
use crate::auth::{AuthApi, DeviceCredentialStore, SessionGuard};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::{initial_route, Route};
use crate::profile::ProfileService;
use crate::scan::{ScanDebouncer, ScanEvent};
use crate::traits::{CredentialStore, HttpClient, Navigator, PlainStore, SecureStore, StorageError};

pub struct AttendEaseClient {
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    auth: AuthApi,
    history: HistoryClient,
    profile: ProfileService,
    pipeline: ScanPipeline,
}

impl AttendEaseClient {
    /// Build with the platform secure store and on-disk plain storage.
    pub fn from_config(config: ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        let data_dir = config.resolve_data_dir().ok_or_else(|| {
            StorageError::Unavailable("could not determine a data directory".to_string())
        })?;
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| ClientError::unreachable(e.to_string()))?;

        let secure = platform_secure_store(&config, &data_dir);
        let plain: Arc<dyn PlainStore> = Arc::new(JsonFileStore::in_dir(&data_dir));

        tracing::info!(
            "Attendance client targeting {} (data in {})",
            config.base_url,
            data_dir.display()
        );
        Ok(Self::with_parts(config, Arc::new(http), secure, plain, navigator))
    }

    pub fn with_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        secure: Arc<dyn SecureStore>,
        plain: Arc<dyn PlainStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let store: Arc<dyn CredentialStore> =
            Arc::new(DeviceCredentialStore::new(secure, plain.clone()));
        let guard = SessionGuard::new(store.clone());
        let debouncer = Arc::new(ScanDebouncer::new());
        let submitter = Arc::new(AttendanceSubmitter::new(
            http.clone(),
            guard.clone(),
            debouncer.clone(),
            &config,
        ));

        Self {
            auth: AuthApi::new(http.clone(), store.clone(), config.clone()),
            history: HistoryClient::new(http, guard.clone(), &config),
            profile: ProfileService::new(plain, guard.clone()),
            pipeline: ScanPipeline::new(debouncer, guard, submitter, navigator),
            store,
            config,
        }
    }

    /// Screen to show at launch.
    pub async fn initial_route(&self) -> Route {
        initial_route(self.store.as_ref()).await
    }

    /// Feed one camera scan into the pipeline.
    pub async fn on_scan(&self, payload: impl Into<String>) -> ScanDisposition {
        self.pipeline.on_scan(ScanEvent::new(payload)).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn history(&self) -> &HistoryClient {
        &self.history
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn pipeline(&self) -> &ScanPipeline {
        &self.pipeline
    }
}

#[cfg(target_os = "macos")]
fn platform_secure_store(config: &ClientConfig, _data_dir: &std::path::Path) -> Arc<dyn SecureStore> {
    Arc::new(crate::adapters::KeychainStore::new(&config.namespace))
}

#[cfg(not(target_os = "macos"))]
fn platform_secure_store(config: &ClientConfig, data_dir: &std::path::Path) -> Arc<dyn SecureStore> {
    Arc::new(crate::adapters::EncryptedFileStore::new(
        data_dir,
        &config.namespace,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        InMemoryPlainStore, InMemorySecureStore, MockHttpClient, MockResponse, NavigationEvent,
        RecordingNavigator,
    };
    use crate::attendance::Outcome;
    use crate::traits::Response;
    use serde_json::json;

    fn client(http: &MockHttpClient, navigator: &Arc<RecordingNavigator>) -> AttendEaseClient {
        AttendEaseClient::with_parts(
            ClientConfig::new().with_base_url("http://attend.test"),
            Arc::new(http.clone()),
            Arc::new(InMemorySecureStore::new()),
            Arc::new(InMemoryPlainStore::new()),
            navigator.clone(),
        )
    }

    #[tokio::test]
    async fn test_login_then_scan_then_logout() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://attend.test/student/sign-in",
            MockResponse::Success(Response::json_body(
                200,
                json!({"token": "abc", "studentId": "S1", "firstName": "Ada"}),
            )),
        );
        http.set_response(
            "http://attend.test/student/mark-attendance",
            MockResponse::Success(Response::json_body(201, json!({"message": "OK"}))),
        );
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client(&http, &navigator);

        assert_eq!(client.initial_route().await, Route::Login);
        client.auth().login("ada@example.edu", "pw").await.unwrap();
        assert_eq!(client.initial_route().await, Route::Home);
        assert_eq!(client.profile().profile().await.unwrap().first_name, "Ada");

        match client.on_scan("CS101").await {
            ScanDisposition::Submitted(handle) => {
                assert_eq!(
                    handle.await.unwrap(),
                    Outcome::Success {
                        message: "OK".into()
                    }
                );
            }
            other => panic!("expected submission, got {:?}", other),
        }
        assert_eq!(
            navigator.events(),
            vec![NavigationEvent::Navigate(Route::Success {
                message: "OK".into()
            })]
        );

        client.profile().logout().await.unwrap();
        assert_eq!(client.initial_route().await, Route::Login);
        assert!(client
            .profile()
            .profile()
            .await
            .unwrap_err()
            .requires_reauth());
    }

    #[test]
    fn test_from_config_uses_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ClientConfig::new().with_data_dir(dir.path());
        let client =
            AttendEaseClient::from_config(config, Arc::new(RecordingNavigator::new())).unwrap();
        assert_eq!(client.config().data_dir.as_deref(), Some(dir.path()));
    }
}
