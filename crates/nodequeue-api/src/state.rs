//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nodequeue_store::PriorityStore;

/// State shared across handlers.
///
/// Holds the one storage handle opened at startup; handlers never keep node
/// data of their own between requests.
pub struct AppState {
    pub store: Arc<dyn PriorityStore>,
    start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn PriorityStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }

    /// Get uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
