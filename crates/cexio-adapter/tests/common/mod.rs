/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for cexio-adapter tests

use cexio_adapter::auth::Clock;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Clock with controllable time, for deterministic nonces and signatures
pub struct MockClock {
    ms: AtomicU64,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(ms: u64) -> Self {
        Self {
            ms: AtomicU64::new(ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::AcqRel);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::Acquire)
    }
}

/// Bind an in-process WebSocket server, returning the listener and its URL
#[allow(dead_code)]
pub async fn bind_ws_server() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let url = format!("ws://{}", listener.local_addr().expect("local addr"));
    (listener, url)
}

/// Accept one WebSocket connection from the client under test
#[allow(dead_code)]
pub async fn accept_ws(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = timeout(Duration::from_secs(5), listener.accept())
        .await
        .expect("timed out waiting for connection")
        .expect("accept failed");
    accept_async(stream).await.expect("ws handshake failed")
}

/// Read the next text frame the client sent, decoded as JSON.
/// Protocol-level ping/pong frames are skipped.
#[allow(dead_code)]
pub async fn next_text(server: &mut WebSocketStream<TcpStream>) -> serde_json::Value {
    loop {
        let message = timeout(Duration::from_secs(5), server.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("ws read error");
        match message {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("frame is not JSON");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}
