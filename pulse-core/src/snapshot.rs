//! Presence snapshot wire payload

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Point-in-time view of the connected population.
///
/// Serialized as JSON and sent to every connected `/ws` client on each
/// broadcast tick. Field names are the wire format; do not rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresenceSnapshot {
    /// Open-session count per reported User-Agent string
    pub user_agents: HashMap<String, usize>,
    /// Total number of currently open WebSocket sessions
    pub websockets: usize,
}
