//! Sign-in and sign-up against the attendance server.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::session::{Session, StudentProfile};
use crate::api::{failure_message, json_headers, post_with_timeout, ResponseClassification};
use crate::config::{endpoints, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::traits::{CredentialStore, HttpClient};

/// Statuses for which the sign-in endpoint sends a readable `error`.
const LOGIN_DOCUMENTED_FAILURES: [u16; 5] = [400, 401, 403, 404, 500];
const LOGIN_FALLBACK: &str = "Unexpected error.";
const LOGIN_UNREACHABLE: &str = "An unexpected error occurred. Please try again later.";

const SIGN_UP_DOCUMENTED_FAILURES: [u16; 3] = [400, 401, 500];
const SIGN_UP_FALLBACK: &str =
    "An error occurred. Please check your network connection and try again.";

/// Minimum password length accepted by sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful sign-in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    student_id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    matric_number: Option<String>,
}

impl LoginResponse {
    fn into_session(self) -> Option<Session> {
        let session = Session::from_parts(Some(self.token), Some(self.student_id))?;
        Some(session.with_profile(StudentProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            matric_number: self.matric_number,
        }))
    }
}

/// New account details.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub matric_number: String,
}

impl SignUpRequest {
    /// Local checks run before any request is sent.
    pub fn validate(&self) -> ClientResult<()> {
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.matric_number,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::Validation("All fields are required.".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(
                "Password must be at least 8 characters long.".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct AuthApi {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn CredentialStore>,
    config: ClientConfig,
}

impl AuthApi {
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn CredentialStore>,
        config: ClientConfig,
    ) -> Self {
        Self {
            http,
            store,
            config,
        }
    }

    /// Sign in and persist the resulting session.
    ///
    /// If the session cannot be persisted the call fails with
    /// [`ClientError::Storage`] and no session exists afterwards.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let url = self.config.url(endpoints::SIGN_IN);
        let body = serde_json::to_string(&LoginRequest { email, password })
            .map_err(|e| ClientError::rejected(e.to_string()))?;

        let result = post_with_timeout(
            self.http.as_ref(),
            &url,
            &body,
            &json_headers(),
            self.config.request_timeout,
        )
        .await;

        let session = match ResponseClassification::from_result(result) {
            ResponseClassification::Success { status: 200, body, .. } => {
                serde_json::from_slice::<LoginResponse>(&body)
                    .ok()
                    .and_then(LoginResponse::into_session)
                    .ok_or_else(|| {
                        tracing::warn!("Sign-in succeeded but the response was malformed");
                        ClientError::rejected(LOGIN_FALLBACK)
                    })?
            }
            ResponseClassification::Success { status, .. } => {
                tracing::warn!("Unexpected sign-in status {}", status);
                return Err(ClientError::rejected(LOGIN_FALLBACK));
            }
            ResponseClassification::Unauthorized { error } => {
                return Err(ClientError::rejected(failure_message(
                    401,
                    error,
                    &LOGIN_DOCUMENTED_FAILURES,
                    LOGIN_FALLBACK,
                )));
            }
            ResponseClassification::Conflict { .. } => {
                return Err(ClientError::rejected(LOGIN_FALLBACK));
            }
            ResponseClassification::Failure { status, error } => {
                tracing::info!("Sign-in refused with status {}", status);
                return Err(ClientError::rejected(failure_message(
                    status,
                    error,
                    &LOGIN_DOCUMENTED_FAILURES,
                    LOGIN_FALLBACK,
                )));
            }
            ResponseClassification::NoResponse { reason } => {
                tracing::warn!("Sign-in request failed: {}", reason);
                return Err(ClientError::unreachable(LOGIN_UNREACHABLE));
            }
        };

        self.store.save(&session).await?;
        tracing::info!("Signed in as student {}", session.student_id());
        Ok(session)
    }

    /// Create an account. Does not sign in.
    pub async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<()> {
        request.validate()?;

        let url = self.config.url(endpoints::SIGN_UP);
        let body =
            serde_json::to_string(request).map_err(|e| ClientError::rejected(e.to_string()))?;

        let result = post_with_timeout(
            self.http.as_ref(),
            &url,
            &body,
            &json_headers(),
            self.config.request_timeout,
        )
        .await;

        match ResponseClassification::from_result(result) {
            ResponseClassification::Success { status: 201, .. } => {
                tracing::info!("Account created for {}", request.email);
                Ok(())
            }
            ResponseClassification::Unauthorized { error } => Err(ClientError::rejected(
                failure_message(401, error, &SIGN_UP_DOCUMENTED_FAILURES, SIGN_UP_FALLBACK),
            )),
            ResponseClassification::Failure { status, error } => Err(ClientError::rejected(
                failure_message(status, error, &SIGN_UP_DOCUMENTED_FAILURES, SIGN_UP_FALLBACK),
            )),
            ResponseClassification::NoResponse { reason } => {
                tracing::warn!("Sign-up request failed: {}", reason);
                Err(ClientError::rejected(SIGN_UP_FALLBACK))
            }
            ResponseClassification::Success { .. } | ResponseClassification::Conflict { .. } => {
                Err(ClientError::rejected(SIGN_UP_FALLBACK))
            }
        }
    }
}
