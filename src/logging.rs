//! Tracing subscriber setup.
//!
//! The host application calls [`init_tracing`] once at startup. The filter
//! is read from `ATTEND_EASE_LOG` (same syntax as `RUST_LOG`) and defaults
//! to `attend_ease=info`.

use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "ATTEND_EASE_LOG";

const DEFAULT_FILTER: &str = "attend_ease=info";

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Short, stable fingerprint of a secret for log lines.
///
/// Tokens are never logged; this is the first 12 hex chars of their SHA-256.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(12);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_eq!(fingerprint("abc").len(), 12);
    }

    #[test]
    fn test_fingerprint_differs_and_hides_input() {
        let fp = fingerprint("secret-token");
        assert_ne!(fp, fingerprint("secret-token2"));
        assert!(!fp.contains("secret"));
        // sha256("abc") = ba7816bf8f01...
        assert_eq!(fingerprint("abc"), "ba7816bf8f01");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        assert!(!init_tracing());
    }
}
