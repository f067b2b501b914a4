//! Client configuration.
//!
//! Use the builder pattern to customize the client; `from_env` reads the
//! server URL and request timeout from the environment.
//!
//! # Example
//!
//! ```ignore
//! use attend_ease::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("https://attendance.example.edu")
//!     .with_request_timeout(Duration::from_secs(10));
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::traits::SecureNamespace;

/// Server URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Cooldown armed after every submission outcome.
pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_secs(5);

/// Upper bound on one network round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variables consulted by [`ClientConfig::from_env`], in priority order.
pub const SERVER_URL_ENV_VARS: [&str; 2] = ["ATTEND_EASE_SERVER_URL", "SERVER_URL"];

/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV_VAR: &str = "ATTEND_EASE_TIMEOUT_SECS";

/// Server endpoint paths.
pub mod endpoints {
    pub const SIGN_IN: &str = "/student/sign-in";
    pub const SIGN_UP: &str = "/student/sign-up";
    pub const MARK_ATTENDANCE: &str = "/student/mark-attendance";
    pub const ATTENDANCE_HISTORY: &str = "/student/attendance-history";
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Attendance server base URL (no trailing slash required)
    pub base_url: String,
    /// Timeout applied to every request; expiry resolves to `Unreachable`
    pub request_timeout: Duration,
    /// Cooldown after an outcome before another scan is admitted
    pub scan_cooldown: Duration,
    /// Optional shorter cooldown for `Rejected`/`Unreachable` outcomes
    pub rejected_cooldown: Option<Duration>,
    /// Secure storage namespace for the token
    pub namespace: SecureNamespace,
    /// Directory for on-disk stores (defaults to the platform data dir)
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            scan_cooldown: DEFAULT_SCAN_COOLDOWN,
            rejected_cooldown: None,
            namespace: SecureNamespace::default(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_scan_cooldown(mut self, cooldown: Duration) -> Self {
        self.scan_cooldown = cooldown;
        self
    }

    /// Use a different cooldown after a rejected or unreachable outcome.
    pub fn with_rejected_cooldown(mut self, cooldown: Duration) -> Self {
        self.rejected_cooldown = Some(cooldown);
        self
    }

    pub fn with_namespace(mut self, namespace: SecureNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Create config from the environment.
    ///
    /// `ATTEND_EASE_SERVER_URL` wins over `SERVER_URL`; an unparsable
    /// `ATTEND_EASE_TIMEOUT_SECS` is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = SERVER_URL_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
        {
            config.base_url = url.trim().to_string();
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV_VAR, raw),
            }
        }

        config
    }

    /// Join the base URL with an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Resolve the directory used by on-disk stores.
    ///
    /// Returns `None` if no data directory is configured and the platform
    /// one cannot be determined.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("attend-ease")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.scan_cooldown, Duration::from_secs(5));
        assert!(config.rejected_cooldown.is_none());
        assert_eq!(config.namespace, SecureNamespace::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = ClientConfig::new()
            .with_base_url("https://api.example.edu")
            .with_request_timeout(Duration::from_secs(3))
            .with_scan_cooldown(Duration::from_secs(2))
            .with_rejected_cooldown(Duration::from_secs(1))
            .with_data_dir("/tmp/attend");

        assert_eq!(config.base_url, "https://api.example.edu");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.scan_cooldown, Duration::from_secs(2));
        assert_eq!(config.rejected_cooldown, Some(Duration::from_secs(1)));
        assert_eq!(config.resolve_data_dir(), Some(PathBuf::from("/tmp/attend")));
    }

    #[test]
    fn test_url_joining_handles_slashes() {
        let config = ClientConfig::new().with_base_url("https://api.example.edu/");
        assert_eq!(
            config.url(endpoints::MARK_ATTENDANCE),
            "https://api.example.edu/student/mark-attendance"
        );

        let config = ClientConfig::new().with_base_url("https://api.example.edu");
        assert_eq!(
            config.url("student/sign-in"),
            "https://api.example.edu/student/sign-in"
        );
    }
}
