//! WebSocket presence handler
//!
//! Each connected client gets an independent loop that sends a
//! [`PresenceSnapshot`](pulse_core::PresenceSnapshot) every tick until the
//! connection closes. Registration happens before the first send and
//! deregistration is tied to the loop's scope through a `PresenceGuard`, so
//! teardown runs exactly once on every exit path.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::AppState;

/// Cadence of the snapshot broadcast to each client
const SNAPSHOT_INTERVAL: Duration = Duration::from_millis(100);

/// Placeholder for clients that send no User-Agent header
const UNKNOWN_USER_AGENT: &str = "unknown";

/// WebSocket upgrade handler for the presence endpoint
///
/// The User-Agent header is captured before the upgrade; it is immutable for
/// the session's lifetime.
pub async fn presence_ws(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let user_agent = user_agent_from_headers(&headers);
    ws.on_upgrade(move |socket| handle_presence(socket, state, user_agent))
}

fn user_agent_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN_USER_AGENT)
        .to_string()
}

/// Drive one client's presence loop until the connection closes
async fn handle_presence(socket: WebSocket, state: Arc<AppState>, user_agent: String) {
    let (mut sender, mut receiver) = socket.split();

    // Register before the first send; the guard's drop deregisters exactly
    // once no matter how the loop below exits.
    let guard = state.tracker.connect(user_agent);
    info!(session = %guard.session_id(), "presence client connected");

    let mut ticker = tokio::time::interval(SNAPSHOT_INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = state.tracker.snapshot();
                let json = match serde_json::to_string(&snapshot) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("failed to serialize snapshot: {}", e);
                        break;
                    }
                };
                // A failed send means the peer is gone; that ends only this
                // session's loop.
                if let Err(e) = sender.send(Message::Text(json.into())).await {
                    debug!(session = %guard.session_id(), "presence send failed: {}", e);
                    break;
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    // Inbound frames are drained for close detection only;
                    // their content is never interpreted.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(session = %guard.session_id(), "presence receive failed: {}", e);
                        break;
                    }
                }
            }
        }
    }

    info!(session = %guard.session_id(), "presence client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn user_agent_read_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/7.0"));
        assert_eq!(user_agent_from_headers(&headers), "curl/7.0");
    }

    #[test]
    fn missing_user_agent_falls_back_to_placeholder() {
        let headers = HeaderMap::new();
        assert_eq!(user_agent_from_headers(&headers), "unknown");
    }

    #[test]
    fn non_utf8_user_agent_falls_back_to_placeholder() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_bytes(b"\xff\xfe").unwrap());
        assert_eq!(user_agent_from_headers(&headers), "unknown");
    }
}
