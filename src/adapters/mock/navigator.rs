//! Recording navigator for testing.

use std::sync::{Arc, Mutex};

use crate::navigation::Route;
use crate::traits::Navigator;

/// One call made on the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Navigate(Route),
    Replace(Route),
}

/// Navigator that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    events: Arc<Mutex<Vec<NavigationEvent>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Route the user would currently see.
    pub fn current(&self) -> Option<Route> {
        self.events.lock().unwrap().last().map(|event| match event {
            NavigationEvent::Navigate(route) | NavigationEvent::Replace(route) => route.clone(),
        })
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.events
            .lock()
            .unwrap()
            .push(NavigationEvent::Navigate(route));
    }

    fn replace(&self, route: Route) {
        self.events
            .lock()
            .unwrap()
            .push(NavigationEvent::Replace(route));
    }
}
