//! Attendance history for the signed-in student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{bearer_headers, failure_message, post_with_timeout, ResponseClassification};
use crate::auth::SessionGuard;
use crate::config::{endpoints, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::traits::HttpClient;

const DOCUMENTED_FAILURES: [u16; 3] = [400, 404, 500];
const UNEXPECTED_STATUS: &str = "An unexpected error occurred!";
const UNREACHABLE: &str = "An unknown error occurred!";
const MALFORMED_BODY: &str = "Unexpected error occurred. Please try again.";

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub class_name: String,
    /// Usually `Present` or `Absent`.
    pub status: String,
    pub date: DateTime<Utc>,
    pub time: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.status == "Present"
    }

    /// `YYYY-MM-DD`, UTC.
    pub fn display_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM`, UTC.
    pub fn display_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// The server lists records oldest first.
pub fn newest_first(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records.reverse();
    records
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRequest<'a> {
    student_id: &'a str,
}

pub struct HistoryClient {
    http: Arc<dyn HttpClient>,
    guard: SessionGuard,
    url: String,
    timeout: Duration,
}

impl HistoryClient {
    pub fn new(http: Arc<dyn HttpClient>, guard: SessionGuard, config: &ClientConfig) -> Self {
        Self {
            http,
            guard,
            url: config.url(endpoints::ATTENDANCE_HISTORY),
            timeout: config.request_timeout,
        }
    }

    /// Fetch the stored student's records in server order.
    pub async fn fetch(&self) -> ClientResult<Vec<AttendanceRecord>> {
        let session = self.guard.require_session().await?;
        let body = serde_json::to_string(&HistoryRequest {
            student_id: session.student_id(),
        })
        .map_err(|e| ClientError::rejected(e.to_string()))?;

        let result = post_with_timeout(
            self.http.as_ref(),
            &self.url,
            &body,
            &bearer_headers(&session),
            self.timeout,
        )
        .await;

        match ResponseClassification::from_result(result) {
            ResponseClassification::Success { status: 200, body, .. } => {
                serde_json::from_slice::<Vec<AttendanceRecord>>(&body).map_err(|e| {
                    tracing::warn!("Unreadable attendance history: {}", e);
                    ClientError::rejected(MALFORMED_BODY)
                })
            }
            ResponseClassification::Success { status, .. } => {
                tracing::warn!("Unexpected history status {}", status);
                Err(ClientError::rejected(MALFORMED_BODY))
            }
            ResponseClassification::Unauthorized { .. } => {
                Err(self.guard.invalidate().await.into())
            }
            ResponseClassification::Conflict { .. } => {
                Err(ClientError::rejected(UNEXPECTED_STATUS))
            }
            ResponseClassification::Failure { status, error } => Err(ClientError::rejected(
                failure_message(status, error, &DOCUMENTED_FAILURES, UNEXPECTED_STATUS),
            )),
            ResponseClassification::NoResponse { reason } => {
                tracing::warn!("History request failed: {}", reason);
                Err(ClientError::unreachable(UNREACHABLE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::auth::Session;
    use crate::error::AuthError;
    use crate::traits::{HttpError, Response};
    use serde_json::json;

    fn client(http: &MockHttpClient, store: &Arc<InMemoryCredentials>) -> HistoryClient {
        HistoryClient::new(
            Arc::new(http.clone()),
            SessionGuard::new(store.clone()),
            &ClientConfig::new().with_base_url("http://attend.test"),
        )
    }

    fn signed_in() -> Arc<InMemoryCredentials> {
        Arc::new(InMemoryCredentials::with_session(Session::new("abc", "S1")))
    }

    fn records_json() -> serde_json::Value {
        json!([
            {
                "_id": "r1",
                "className": "CS101",
                "status": "Present",
                "date": "2024-10-01T00:00:00.000Z",
                "time": "2024-10-01T09:05:30.000Z"
            },
            {
                "_id": "r2",
                "className": "MTH201",
                "status": "Absent",
                "date": "2024-10-02T00:00:00.000Z",
                "time": "2024-10-02T14:45:00.000Z"
            }
        ])
    }

    #[tokio::test]
    async fn test_fetch_parses_records() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            records_json(),
        )));
        let store = signed_in();

        let records = client(&http, &store).fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "r1");
        assert!(records[0].is_present());
        assert_eq!(records[0].display_date(), "2024-10-01");
        assert_eq!(records[0].display_time(), "09:05");

        let newest = newest_first(records);
        assert_eq!(newest[0].class_name, "MTH201");

        let requests = http.get_requests();
        assert_eq!(requests[0].url, "http://attend.test/student/attendance-history");
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"studentId": "S1"}));
    }

    #[tokio::test]
    async fn test_fetch_without_session_sends_nothing() {
        let http = MockHttpClient::new();
        let store = Arc::new(InMemoryCredentials::new());

        let err = client(&http, &store).fetch().await.unwrap_err();
        assert_eq!(err, ClientError::Auth(AuthError::NoSession));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            401,
            json!({"error": "jwt expired"}),
        )));
        let store = signed_in();

        let err = client(&http, &store).fetch().await.unwrap_err();
        assert_eq!(err, ClientError::Auth(AuthError::SessionExpired));
        assert!(err.requires_reauth());
        assert_eq!(store.clear_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_messages() {
        let store = signed_in();
        let cases = [
            (404, json!({"error": "No records"}), "No records"),
            (500, json!({"error": "db down"}), "db down"),
            (418, json!({"error": "teapot"}), UNEXPECTED_STATUS),
        ];
        for (status, body, expected) in cases {
            let http = MockHttpClient::new();
            http.set_default_response(MockResponse::Success(Response::json_body(status, body)));
            let err = client(&http, &store).fetch().await.unwrap_err();
            assert_eq!(err, ClientError::rejected(expected));
        }
    }

    #[tokio::test]
    async fn test_malformed_body_and_unreachable() {
        let store = signed_in();

        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            json!({"records": []}),
        )));
        let err = client(&http, &store).fetch().await.unwrap_err();
        assert_eq!(err, ClientError::rejected(MALFORMED_BODY));

        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::Timeout("slow".into())));
        let err = client(&http, &store).fetch().await.unwrap_err();
        assert_eq!(err, ClientError::unreachable(UNREACHABLE));
    }
}
