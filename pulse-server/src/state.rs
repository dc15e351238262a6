//! Shared application state for the pulse server

use chrono::{DateTime, Utc};
use pulse_core::PresenceTracker;

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Presence tracker for WebSocket connections
    pub tracker: PresenceTracker,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with a fresh tracker
    pub fn new() -> Self {
        Self {
            tracker: PresenceTracker::new(),
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
