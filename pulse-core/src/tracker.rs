//! PresenceTracker - registry of open sessions and their User-Agent histogram
//!
//! All shared state lives behind a single mutex so concurrent connection
//! handlers never observe a half-applied connect or disconnect. The lock is
//! only ever held for map operations and is never held across an await point,
//! which is why a `std::sync::Mutex` is used rather than an async lock: it
//! lets teardown run inside `Drop`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::snapshot::PresenceSnapshot;

/// Opaque identity of one open WebSocket session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registry and histogram, mutated together under one lock
#[derive(Default)]
struct Inner {
    /// Sessions whose connection is open and whose registration completed
    sessions: HashSet<SessionId>,
    /// Open-session count per User-Agent; values are always >= 1
    user_agents: HashMap<String, usize>,
}

/// Tracks live WebSocket connections and answers presence snapshots.
///
/// One tracker is constructed at server startup and a clone of the handle is
/// shared with every connection handler. Registration returns a
/// [`PresenceGuard`] whose drop deregisters the session, so a handler cannot
/// leak an entry no matter how its task exits.
#[derive(Clone, Default)]
pub struct PresenceTracker {
    inner: Arc<Mutex<Inner>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session reporting `user_agent`.
    ///
    /// The session is in the registry and counted in the histogram before
    /// this returns. Infallible: registration is in-memory only.
    pub fn connect(&self, user_agent: impl Into<String>) -> PresenceGuard {
        let user_agent = user_agent.into();
        let id = SessionId::new();

        {
            let mut inner = self.lock();
            inner.sessions.insert(id);
            *inner.user_agents.entry(user_agent.clone()).or_insert(0) += 1;
        }
        tracing::debug!(session = %id, user_agent = %user_agent, "session connected");

        PresenceGuard {
            tracker: self.clone(),
            id,
            user_agent,
        }
    }

    /// Consistent point-in-time view of the registry and histogram.
    ///
    /// Both fields are read under the same lock acquisition, so the count
    /// always matches the histogram sum even while other sessions are
    /// connecting or disconnecting.
    pub fn snapshot(&self) -> PresenceSnapshot {
        let inner = self.lock();
        PresenceSnapshot {
            user_agents: inner.user_agents.clone(),
            websockets: inner.sessions.len(),
        }
    }

    /// Number of currently open sessions
    pub fn connection_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// Deregister a session. Idempotent: registry membership gates the
    /// histogram decrement, so a second signal for the same session is a
    /// no-op.
    fn disconnect(&self, id: SessionId, user_agent: &str) {
        {
            let mut inner = self.lock();
            if !inner.sessions.remove(&id) {
                return;
            }

            if let Some(count) = inner.user_agents.get_mut(user_agent) {
                *count -= 1;
                if *count == 0 {
                    inner.user_agents.remove(user_agent);
                }
            }
        }

        tracing::debug!(session = %id, user_agent = %user_agent, "session disconnected");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the maps structurally intact
        // (single-operation critical sections), so poisoning is recoverable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scoped registration of one session.
///
/// Dropping the guard deregisters the session and decrements its User-Agent
/// count, exactly once, regardless of how the owning task exited.
pub struct PresenceGuard {
    tracker: PresenceTracker,
    id: SessionId,
    user_agent: String,
}

impl PresenceGuard {
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Drop for PresenceGuard {
    fn drop(&mut self) {
        self.tracker.disconnect(self.id, &self.user_agent);
    }
}
