//! Shared plumbing for talking to the attendance server.

pub mod classification;

pub use classification::{failure_message, ResponseClassification};

use std::time::Duration;

use crate::auth::Session;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Headers for a JSON request without credentials.
pub fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}

/// Headers for a JSON request carrying the session's bearer token.
pub fn bearer_headers(session: &Session) -> Headers {
    let mut headers = json_headers();
    headers.insert("Authorization".to_string(), session.bearer());
    headers
}

/// POST with an upper bound on the round trip.
///
/// Expiry is reported as [`HttpError::Timeout`]. The underlying request is
/// not cancelled on the server side; only its result is discarded.
pub async fn post_with_timeout(
    http: &dyn HttpClient,
    url: &str,
    body: &str,
    headers: &Headers,
    timeout: Duration,
) -> Result<Response, HttpError> {
    match tokio::time::timeout(timeout, http.post(url, body, headers)).await {
        Ok(result) => result,
        Err(_) => Err(HttpError::Timeout(format!(
            "no response from {} within {}s",
            url,
            timeout.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_headers() {
        let session = Session::new("abc", "S1");
        let headers = bearer_headers(&session);
        assert_eq!(headers.get("Authorization"), Some(&"Bearer abc".to_string()));
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_json_headers_have_no_credentials() {
        assert!(!json_headers().contains_key("Authorization"));
    }
}
