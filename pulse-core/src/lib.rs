//! pulse-core - presence tracking for the pulse server
//!
//! This crate owns the shared connection state: which WebSocket sessions are
//! open right now, grouped by the User-Agent string they reported. The server
//! crate holds one `PresenceTracker` and hands each connection handler a
//! [`PresenceGuard`] so teardown happens on every exit path.

mod snapshot;
mod tracker;

pub use snapshot::PresenceSnapshot;
pub use tracker::{PresenceGuard, PresenceTracker, SessionId};
