/*
[INPUT]:  WebSocket endpoint, credentials, stop signal
[OUTPUT]: Authenticated session with reconnection and event delivery
[POS]:    WebSocket layer - session state machine and transport loop
[UPDATE]: When changing connection lifecycle or reconnection logic
*/

use crate::auth::{Clock, Credentials, ws_signature};
use crate::http::{CexError, Result};
use crate::ws::envelope::{self, Command};
use crate::ws::event::{EventKind, InboundFrame, SessionEvent};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Production WebSocket endpoint
pub const WS_URL: &str = "wss://ws.cex.io/ws";

type WsWriteHalf = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsReadHalf = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Session configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// WebSocket URL
    pub url: String,
    /// Fixed delay between a close/error and the next connect attempt.
    /// Reconnection repeats indefinitely until stop is requested.
    pub reconnect_delay: Duration,
    /// Upper bound on how long `start()` waits for the first connect attempt
    pub start_timeout: Duration,
    /// Capacity of the inbound event channel
    pub event_buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: WS_URL.to_string(),
            reconnect_delay: Duration::from_secs(5),
            start_timeout: Duration::from_secs(10),
            event_buffer: 100,
        }
    }
}

/// Connection/authentication status of the session.
///
/// Written only by the session task; observed through a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    ConnectedUnauthenticated,
    Authenticated,
    Stopping,
}

/// The session state machine.
///
/// Owns the connection lifecycle: connect, authenticate with a fresh nonce,
/// pump frames, answer pings, and reconnect after a fixed delay on any
/// transport failure until stop is requested. Socket writes happen only
/// inside the session task's select loop; callers reach the wire through a
/// per-connection channel, so sends can never race a teardown onto a
/// half-closed socket.
pub(crate) struct Session {
    config: WsConfig,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    state_tx: watch::Sender<SessionState>,
    event_tx: mpsc::Sender<SessionEvent>,
    /// Live only while a connection is up; `None` means sends fail fast
    outbound: Mutex<Option<mpsc::Sender<String>>>,
    shutdown: CancellationToken,
}

impl Session {
    pub(crate) fn new(
        credentials: Credentials,
        config: WsConfig,
        clock: Arc<dyn Clock>,
    ) -> (
        Self,
        watch::Receiver<SessionState>,
        mpsc::Receiver<SessionEvent>,
    ) {
        let (state_tx, state_rx) = watch::channel(SessionState::Disconnected);
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
        let session = Self {
            config,
            credentials,
            clock,
            state_tx,
            event_tx,
            outbound: Mutex::new(None),
            shutdown: CancellationToken::new(),
        };
        (session, state_rx, event_rx)
    }

    pub(crate) fn config(&self) -> &WsConfig {
        &self.config
    }

    pub(crate) fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    pub(crate) fn now_secs(&self) -> u64 {
        self.clock.now_secs()
    }

    /// Request shutdown; effective even mid-reconnect-delay
    pub(crate) fn shutdown(&self) {
        self.shutdown.cancel()
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn set_state(&self, state: SessionState) {
        let previous = *self.state_tx.borrow();
        if previous != state {
            debug!(?previous, ?state, "session state");
            self.state_tx.send_replace(state);
        }
    }

    /// Send an authenticated command, returning its correlation id.
    ///
    /// Rejected locally with `AuthRequired` unless the session is
    /// authenticated; never queued for later delivery.
    pub(crate) async fn send_authenticated(&self, command: Command) -> Result<String> {
        if self.state() != SessionState::Authenticated {
            let tag = command
                .payload
                .get("e")
                .and_then(Value::as_str)
                .unwrap_or("command")
                .to_string();
            return Err(CexError::AuthRequired { command: tag });
        }
        self.send_raw(&command.payload).await?;
        Ok(command.oid)
    }

    /// Send a public (unauthenticated) frame; requires a live connection
    pub(crate) async fn send_public(&self, payload: &Value) -> Result<()> {
        self.send_raw(payload).await
    }

    async fn send_raw(&self, payload: &Value) -> Result<()> {
        let sender = {
            let guard = self.outbound.lock().await;
            guard.clone().ok_or(CexError::NotConnected)?
        };
        sender
            .send(payload.to_string())
            .await
            .map_err(|_| CexError::NotConnected)
    }

    /// Connect-and-block loop: runs until stop is requested, reconnecting
    /// after `reconnect_delay` on every failure
    pub(crate) async fn run(&self) {
        info!(url = %self.config.url, "session starting");
        loop {
            if self.is_shutdown() {
                break;
            }
            self.set_state(SessionState::Connecting);

            let result = self.run_connection().await;
            *self.outbound.lock().await = None;

            match result {
                Ok(()) => break,
                Err(err) => {
                    warn!(%err, "connection lost");
                    let _ = self
                        .event_tx
                        .send(SessionEvent::Disconnected {
                            reason: err.to_string(),
                        })
                        .await;
                }
            }
            self.set_state(SessionState::Disconnected);

            if self.is_shutdown() {
                break;
            }
            debug!(
                delay_ms = self.config.reconnect_delay.as_millis() as u64,
                "reconnect scheduled"
            );
            tokio::select! {
                () = tokio::time::sleep(self.config.reconnect_delay) => {}
                () = self.shutdown.cancelled() => break,
            }
        }
        self.set_state(SessionState::Disconnected);
        info!("session stopped");
    }

    /// One connection: open, authenticate, pump frames. `Ok` means stop was
    /// requested; every other exit is a transport failure.
    async fn run_connection(&self) -> Result<()> {
        info!(url = %self.config.url, "connecting");
        let (ws_stream, _response) = connect_async(self.config.url.as_str())
            .await
            .map_err(|err| CexError::Transport(err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();

        let (outbound_tx, outbound_rx) = mpsc::channel(self.config.event_buffer);
        {
            let mut guard = self.outbound.lock().await;
            if guard.is_some() {
                // two concurrent run() calls on one session
                return Err(CexError::AlreadyConnected);
            }
            *guard = Some(outbound_tx);
        }

        self.set_state(SessionState::ConnectedUnauthenticated);
        let _ = self.event_tx.send(SessionEvent::Connected).await;

        // Fresh nonce per connection; a rejected auth is only retried by
        // reconnecting, which lands here again with a new timestamp.
        let nonce = self.clock.now_secs();
        let signature = ws_signature(nonce, &self.credentials.api_key, &self.credentials.api_secret);
        let frame = envelope::auth(&self.credentials.api_key, &signature, nonce);
        write
            .send(Message::Text(frame.to_string().into()))
            .await
            .map_err(|err| CexError::Transport(err.to_string()))?;
        debug!(nonce, "auth request sent");

        self.pump(&mut write, &mut read, outbound_rx).await
    }

    async fn pump(
        &self,
        write: &mut WsWriteHalf,
        read: &mut WsReadHalf,
        mut outbound_rx: mpsc::Receiver<String>,
    ) -> Result<()> {
        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => {
                    self.set_state(SessionState::Stopping);
                    if let Err(err) = write.send(Message::Close(None)).await {
                        debug!(%err, "close frame failed during shutdown");
                    }
                    return Ok(());
                }

                inbound = read.next() => {
                    match inbound {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text(text.as_str(), write).await?;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await
                                .map_err(|err| CexError::Transport(err.to_string()))?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let reason = frame
                                .map(|f| format!("code {}: {}", u16::from(f.code), f.reason.as_str()))
                                .unwrap_or_else(|| "no close frame".to_string());
                            return Err(CexError::Transport(format!("closed by server, {reason}")));
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            return Err(CexError::Transport(err.to_string()));
                        }
                        None => {
                            return Err(CexError::Transport("stream ended".to_string()));
                        }
                    }
                }

                outbound = outbound_rx.recv() => {
                    if let Some(text) = outbound {
                        write.send(Message::Text(text.into())).await
                            .map_err(|err| CexError::Transport(err.to_string()))?;
                    }
                }
            }
        }
    }

    /// Decode, classify and dispatch one text frame. Malformed payloads are
    /// logged and dropped; they never take down the receive loop.
    async fn handle_text(&self, text: &str, write: &mut WsWriteHalf) -> Result<()> {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, bytes = text.len(), "dropping malformed frame");
                return Ok(());
            }
        };
        let frame = InboundFrame::from_value(value);

        match frame.kind {
            EventKind::Ping => {
                debug!("ping received, answering");
                write
                    .send(Message::Text(envelope::pong().to_string().into()))
                    .await
                    .map_err(|err| CexError::Transport(err.to_string()))?;
            }
            EventKind::AuthAck => self.handle_auth_ack(frame).await,
            _ => {
                if self.event_tx.send(SessionEvent::Frame(frame)).await.is_err() {
                    debug!("event receiver dropped");
                }
            }
        }
        Ok(())
    }

    async fn handle_auth_ack(&self, frame: InboundFrame) {
        let ok = frame.payload.get("ok").and_then(Value::as_str);
        if ok == Some("ok") {
            // transitions to Authenticated exactly once per connection
            if self.state() == SessionState::ConnectedUnauthenticated {
                self.set_state(SessionState::Authenticated);
                info!("authenticated");
                let _ = self.event_tx.send(SessionEvent::Authenticated).await;
            } else {
                debug!("duplicate auth ack ignored");
            }
        } else {
            let reason = frame
                .payload
                .get("data")
                .and_then(|data| data.get("error"))
                .and_then(Value::as_str)
                .or(ok)
                .unwrap_or("unspecified")
                .to_string();
            warn!(reason = %reason, "authentication rejected");
            let _ = self.event_tx.send(SessionEvent::AuthFailed { reason }).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SystemClock;

    #[test]
    fn test_default_config() {
        let config = WsConfig::default();
        assert_eq!(config.url, WS_URL);
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_send_while_disconnected_is_rejected_locally() {
        let (session, _state_rx, _event_rx) = Session::new(
            Credentials::new("user", "key", "secret"),
            WsConfig::default(),
            Arc::new(SystemClock),
        );

        let command = envelope::get_balance(1_700_000_000);
        let err = session.send_authenticated(command).await.unwrap_err();
        assert!(matches!(err, CexError::AuthRequired { command } if command == "get-balance"));

        let err = session
            .send_public(&envelope::subscribe_tickers())
            .await
            .unwrap_err();
        assert!(matches!(err, CexError::NotConnected));
    }
}
