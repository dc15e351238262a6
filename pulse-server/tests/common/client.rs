//! WebSocket test client
//!
//! Note: Some methods may appear unused because they're only used in specific
//! test files and clippy checks each test independently.

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket connection to one server endpoint
pub struct WsConnection {
    ws: WsStream,
}

impl WsConnection {
    /// Connect to an endpoint without sending a User-Agent header
    #[allow(dead_code)]
    pub async fn connect(addr: SocketAddr, path: &str) -> Self {
        let url = format!("ws://{}{}", addr, path);
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("Failed to connect");
        Self { ws }
    }

    /// Connect to an endpoint reporting the given User-Agent
    #[allow(dead_code)]
    pub async fn connect_with_user_agent(addr: SocketAddr, path: &str, user_agent: &str) -> Self {
        let url = format!("ws://{}{}", addr, path);
        let mut request = url.into_client_request().expect("invalid URL");
        request.headers_mut().insert(
            "User-Agent",
            HeaderValue::from_str(user_agent).expect("invalid User-Agent"),
        );

        let (ws, _) = tokio_tungstenite::connect_async(request)
            .await
            .expect("Failed to connect");
        Self { ws }
    }

    /// Send raw text message
    #[allow(dead_code)]
    pub async fn send_raw(&mut self, msg: &str) {
        self.ws
            .send(Message::Text(msg.to_string().into()))
            .await
            .unwrap();
    }

    /// Receive raw text message
    pub async fn recv_raw(&mut self) -> String {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return text.to_string(),
                Some(Ok(Message::Ping(_))) => continue,
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {}", e),
                None => panic!("WebSocket closed"),
            }
        }
    }

    /// Receive and deserialize JSON message
    pub async fn recv_json<T: DeserializeOwned>(&mut self) -> T {
        let text = self.recv_raw().await;
        serde_json::from_str(&text).expect("Failed to parse JSON")
    }

    /// Keep receiving until `predicate` accepts a message or the deadline
    /// passes; returns the accepted message
    pub async fn recv_json_until<T, F>(&mut self, deadline: Duration, mut predicate: F) -> T
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        tokio::time::timeout(deadline, async {
            loop {
                let msg: T = self.recv_json().await;
                if predicate(&msg) {
                    return msg;
                }
            }
        })
        .await
        .expect("Timed out waiting for matching message")
    }

    /// Close the connection cleanly
    #[allow(dead_code)]
    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
