//! Screen routes and outcome presentation.
//!
//! Rendering is out of scope; the client only decides *which* screen comes
//! next and hands it to a [`Navigator`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::attendance::Outcome;
use crate::traits::{CredentialStore, Navigator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    SignUp,
    Success { message: String },
    Failure { message: String },
    AlreadyMarked { message: String },
}

/// How a route is applied to the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Navigate(Route),
    /// Replace the whole stack; used for sign-in so "back" cannot return
    /// to an authenticated screen.
    Replace(Route),
}

impl Route {
    pub fn for_outcome(outcome: &Outcome) -> Transition {
        match outcome {
            Outcome::Success { message } => Transition::Navigate(Route::Success {
                message: message.clone(),
            }),
            Outcome::DuplicateMark { message } => Transition::Navigate(Route::AlreadyMarked {
                message: message.clone(),
            }),
            Outcome::Rejected { message } | Outcome::Unreachable { message } => {
                Transition::Navigate(Route::Failure {
                    message: message.clone(),
                })
            }
            Outcome::SessionExpired => Transition::Replace(Route::Login),
        }
    }
}

/// Route shown at launch.
pub async fn initial_route(store: &dyn CredentialStore) -> Route {
    match store.load().await {
        Some(_) => Route::Home,
        None => Route::Login,
    }
}

/// Consumes outcomes and drives the navigator.
///
/// Deactivating the presenter models the scan screen being left while a
/// submission is still running: outcomes keep arriving but are not shown.
#[derive(Clone)]
pub struct OutcomePresenter {
    navigator: Arc<dyn Navigator>,
    active: Arc<AtomicBool>,
}

impl OutcomePresenter {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Present an outcome. Returns false if the presenter is inactive.
    pub fn present(&self, outcome: &Outcome) -> bool {
        if !self.is_active() {
            tracing::debug!("Presenter inactive, not showing {}", outcome.kind());
            return false;
        }
        self.apply(Route::for_outcome(outcome));
        true
    }

    /// Send the student back to sign-in.
    pub fn require_sign_in(&self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.apply(Transition::Replace(Route::Login));
        true
    }

    fn apply(&self, transition: Transition) {
        match transition {
            Transition::Navigate(route) => self.navigator.navigate(route),
            Transition::Replace(route) => self.navigator.replace(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, NavigationEvent, RecordingNavigator};
    use crate::auth::Session;

    #[test]
    fn test_outcome_routes() {
        let cases = [
            (
                Outcome::Success {
                    message: "OK".into(),
                },
                Transition::Navigate(Route::Success {
                    message: "OK".into(),
                }),
            ),
            (
                Outcome::DuplicateMark {
                    message: "Already marked".into(),
                },
                Transition::Navigate(Route::AlreadyMarked {
                    message: "Already marked".into(),
                }),
            ),
            (
                Outcome::Rejected {
                    message: "Class not found".into(),
                },
                Transition::Navigate(Route::Failure {
                    message: "Class not found".into(),
                }),
            ),
            (
                Outcome::Unreachable {
                    message: "down".into(),
                },
                Transition::Navigate(Route::Failure {
                    message: "down".into(),
                }),
            ),
            (Outcome::SessionExpired, Transition::Replace(Route::Login)),
        ];

        for (outcome, expected) in cases {
            assert_eq!(Route::for_outcome(&outcome), expected, "{}", outcome);
        }
    }

    #[tokio::test]
    async fn test_initial_route() {
        let empty = InMemoryCredentials::new();
        assert_eq!(initial_route(&empty).await, Route::Login);

        let signed_in = InMemoryCredentials::with_session(Session::new("abc", "S1"));
        assert_eq!(initial_route(&signed_in).await, Route::Home);
    }

    #[test]
    fn test_inactive_presenter_is_silent() {
        let navigator = Arc::new(RecordingNavigator::new());
        let presenter = OutcomePresenter::new(navigator.clone());

        assert!(presenter.present(&Outcome::SessionExpired));
        presenter.set_active(false);
        assert!(!presenter.present(&Outcome::Success {
            message: "OK".into()
        }));
        assert!(!presenter.require_sign_in());

        assert_eq!(
            navigator.events(),
            vec![NavigationEvent::Replace(Route::Login)]
        );
    }
}
