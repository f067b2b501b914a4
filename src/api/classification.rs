//! Closed classification of a server round trip.
//!
//! Callers match on [`ResponseClassification`] instead of poking at status
//! codes and ad hoc JSON fields.

use bytes::Bytes;

use crate::traits::{HttpError, Response};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseClassification {
    /// Any 2xx. `message` is the body's `message` field when present.
    Success {
        status: u16,
        message: Option<String>,
        body: Bytes,
    },
    /// 401.
    Unauthorized { error: Option<String> },
    /// 409.
    Conflict { error: Option<String> },
    /// Any other non-2xx status. `error` is the body's `error` field when present.
    Failure { status: u16, error: Option<String> },
    /// No response reached the client.
    NoResponse { reason: HttpError },
}

impl ResponseClassification {
    pub fn from_response(response: Response) -> Self {
        match response.status {
            200..=299 => ResponseClassification::Success {
                status: response.status,
                message: response.json_string_field("message"),
                body: response.body,
            },
            401 => ResponseClassification::Unauthorized {
                error: response.json_string_field("error"),
            },
            409 => ResponseClassification::Conflict {
                error: response.json_string_field("error"),
            },
            status => ResponseClassification::Failure {
                status,
                error: response.json_string_field("error"),
            },
        }
    }

    pub fn from_result(result: Result<Response, HttpError>) -> Self {
        match result {
            Ok(response) => Self::from_response(response),
            Err(reason) => ResponseClassification::NoResponse { reason },
        }
    }

    /// Status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseClassification::Success { status, .. }
            | ResponseClassification::Failure { status, .. } => Some(*status),
            ResponseClassification::Unauthorized { .. } => Some(401),
            ResponseClassification::Conflict { .. } => Some(409),
            ResponseClassification::NoResponse { .. } => None,
        }
    }
}

/// Pick the server's text for a failure when the status is one the endpoint
/// documents, otherwise the generic fallback.
///
/// A documented status with no readable `error` field also gets the fallback.
pub fn failure_message(
    status: u16,
    error: Option<String>,
    documented: &[u16],
    fallback: &str,
) -> String {
    if documented.contains(&status) {
        error.unwrap_or_else(|| fallback.to_string())
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_created() {
        let c = ResponseClassification::from_response(Response::json_body(
            201,
            json!({"message": "OK"}),
        ));
        match c {
            ResponseClassification::Success {
                status, message, ..
            } => {
                assert_eq!(status, 201);
                assert_eq!(message.as_deref(), Some("OK"));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_conflict_and_unauthorized() {
        let conflict = ResponseClassification::from_response(Response::json_body(
            409,
            json!({"error": "Already marked"}),
        ));
        assert_eq!(
            conflict,
            ResponseClassification::Conflict {
                error: Some("Already marked".to_string())
            }
        );

        let unauthorized = ResponseClassification::from_response(Response::new(401, Bytes::new()));
        assert_eq!(unauthorized, ResponseClassification::Unauthorized { error: None });
        assert_eq!(unauthorized.status(), Some(401));
    }

    #[test]
    fn test_classify_failure_without_json() {
        let c = ResponseClassification::from_response(Response::new(
            502,
            Bytes::from("<html>Bad Gateway</html>"),
        ));
        assert_eq!(
            c,
            ResponseClassification::Failure {
                status: 502,
                error: None
            }
        );
    }

    #[test]
    fn test_classify_transport_error() {
        let c = ResponseClassification::from_result(Err(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        assert!(matches!(c, ResponseClassification::NoResponse { .. }));
        assert_eq!(c.status(), None);
    }

    #[test]
    fn test_failure_message_documented_vs_unknown() {
        let documented = [400, 404, 500];
        assert_eq!(
            failure_message(404, Some("Class not found".into()), &documented, "fallback"),
            "Class not found"
        );
        assert_eq!(failure_message(404, None, &documented, "fallback"), "fallback");
        assert_eq!(
            failure_message(418, Some("teapot".into()), &documented, "fallback"),
            "fallback"
        );
    }
}
