//! WebSocket echo handler

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::debug;

/// WebSocket upgrade handler for the echo endpoint
pub async fn echo_ws(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_echo)
}

/// Echo every text and binary frame back to the client
async fn handle_echo(mut socket: WebSocket) {
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Binary(data)) => {
                if socket.send(Message::Binary(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!("echo client sent close frame");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("echo websocket error: {}", e);
                break;
            }
        }
    }
}
