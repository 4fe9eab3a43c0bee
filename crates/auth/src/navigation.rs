//! Navigation history.

use std::sync::{Arc, Mutex};

use pizzadash_core::routes::{Navigator, Route};

/// Records every navigation; the last one is the current view.
#[derive(Debug, Clone)]
pub struct History {
    entries: Arc<Mutex<Vec<Route>>>,
}

impl History {
    /// Starts at the given route.
    pub fn starting_at(route: Route) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![route])),
        }
    }

    pub fn current(&self) -> Route {
        self.entries
            .lock()
            .map(|entries| entries.last().copied())
            .ok()
            .flatten()
            .unwrap_or(Route::Landing)
    }

    pub fn entries(&self) -> Vec<Route> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::starting_at(Route::Landing)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "Navigating");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(route);
        }
    }
}
