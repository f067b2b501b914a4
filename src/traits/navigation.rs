//! Navigation abstraction.

use crate::navigation::Route;

/// Screen navigation, implemented by the host UI.
///
/// Calls must return promptly; they are made from submission tasks.
pub trait Navigator: Send + Sync {
    /// Push a route on top of the current one.
    fn navigate(&self, route: Route);

    /// Replace the whole stack with `route`.
    fn replace(&self, route: Route);
}
