/*
[INPUT]:  Credentials, session configuration, user commands
[OUTPUT]: Supervised background session with start/stop and command methods
[POS]:    WebSocket layer - public client facade and lifecycle supervisor
[UPDATE]: When adding new commands or changing lifecycle semantics
*/

use crate::auth::{Clock, Credentials, SystemClock};
use crate::http::{CexError, Result};
use crate::types::Side;
use crate::ws::envelope;
use crate::ws::event::SessionEvent;
use crate::ws::session::{Session, SessionState, WsConfig};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

/// WebSocket client for the CEX.IO trading API.
///
/// `start()` launches the session on a background task; the session
/// authenticates itself on every (re)connect and pushes classified frames to
/// the receiver handed out by [`CexWsClient::take_events`]. Commands return
/// immediately with a correlation id; the response arrives asynchronously as
/// a frame echoing the same `oid`.
pub struct CexWsClient {
    session: Arc<Session>,
    state_rx: watch::Receiver<SessionState>,
    events_rx: Option<mpsc::Receiver<SessionEvent>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CexWsClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, WsConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: WsConfig) -> Self {
        Self::with_config_and_clock(credentials, config, Arc::new(SystemClock))
    }

    /// Fully parameterized constructor; a controlled clock pins the nonces
    /// used in auth frames and correlation ids
    pub fn with_config_and_clock(
        credentials: Credentials,
        config: WsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (session, state_rx, events_rx) = Session::new(credentials, config, clock);
        Self {
            session: Arc::new(session),
            state_rx,
            events_rx: Some(events_rx),
            task: Mutex::new(None),
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Watch channel mirroring every state transition
    pub fn state_watch(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// The inbound event receiver. Yields once; subsequent calls return None.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<SessionEvent>> {
        self.events_rx.take()
    }

    /// Launch the session loop. Returns once the first connect attempt has
    /// been issued or after `start_timeout`, whichever comes first; being
    /// authenticated by then is not guaranteed.
    pub async fn start(&self) -> Result<()> {
        if self.session.is_shutdown() {
            return Err(CexError::Stopped);
        }
        let mut task = self.task.lock().await;
        if task.is_some() {
            return Err(CexError::AlreadyConnected);
        }
        let session = Arc::clone(&self.session);
        *task = Some(tokio::spawn(async move { session.run().await }));
        drop(task);

        let mut state_rx = self.state_rx.clone();
        let issued = async {
            loop {
                if *state_rx.borrow_and_update() != SessionState::Disconnected {
                    break;
                }
                if state_rx.changed().await.is_err() {
                    break;
                }
            }
        };
        if timeout(self.session.config().start_timeout, issued).await.is_err() {
            debug!("start returned before the first connection attempt was observed");
        }
        Ok(())
    }

    /// Stop the session and wait for the background task to exit.
    ///
    /// Idempotent; once it returns, no further reconnect attempts occur.
    /// Terminal for this client instance.
    pub async fn stop(&self) {
        self.session.shutdown();
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                debug!(%err, "session task did not exit cleanly");
            }
        }
    }

    // --- public subscriptions (no authentication needed) ---

    /// Join the tickers room
    pub async fn subscribe_tickers(&self) -> Result<()> {
        self.session.send_public(&envelope::subscribe_tickers()).await
    }

    /// Start the OHLCV candle stream for a pair (`timeframe` e.g. `"1m"`)
    pub async fn subscribe_ohlcv(&self, pair: &str, timeframe: &str) -> Result<()> {
        self.session
            .send_public(&envelope::subscribe_ohlcv(pair, timeframe)?)
            .await
    }

    /// Join the legacy per-pair room
    pub async fn subscribe_pair_room(&self, pair: &str) -> Result<()> {
        self.session
            .send_public(&envelope::subscribe_pair_room(pair)?)
            .await
    }

    // --- authenticated commands, each returning its correlation id ---

    /// Query the ticker for one pair
    pub async fn get_ticker(&self, pair: &str) -> Result<String> {
        let command = envelope::get_ticker(pair, self.session.now_secs())?;
        self.session.send_authenticated(command).await
    }

    /// Query the account balance
    pub async fn get_balance(&self) -> Result<String> {
        let command = envelope::get_balance(self.session.now_secs());
        self.session.send_authenticated(command).await
    }

    /// Subscribe to the order book for a pair at the given depth
    pub async fn subscribe_order_book(&self, pair: &str, depth: u32) -> Result<String> {
        let command = envelope::order_book_subscribe(pair, depth, self.session.now_secs())?;
        self.session.send_authenticated(command).await
    }

    /// Unsubscribe from the order book for a pair
    pub async fn unsubscribe_order_book(&self, pair: &str) -> Result<String> {
        let command = envelope::order_book_unsubscribe(pair, self.session.now_secs())?;
        self.session.send_authenticated(command).await
    }

    /// List open orders for a pair
    pub async fn open_orders(&self, pair: &str) -> Result<String> {
        let command = envelope::open_orders(pair, self.session.now_secs())?;
        self.session.send_authenticated(command).await
    }

    /// Place a limit order
    pub async fn place_order(
        &self,
        pair: &str,
        side: Side,
        price: Decimal,
        amount: Decimal,
    ) -> Result<String> {
        let command = envelope::place_order(pair, side, price, amount, self.session.now_secs())?;
        self.session.send_authenticated(command).await
    }

    /// Cancel an order and place a replacement in one step
    pub async fn cancel_replace_order(
        &self,
        order_id: &str,
        pair: &str,
        side: Side,
        price: Decimal,
        amount: Decimal,
    ) -> Result<String> {
        let command = envelope::cancel_replace_order(
            order_id,
            pair,
            side,
            price,
            amount,
            self.session.now_secs(),
        )?;
        self.session.send_authenticated(command).await
    }

    /// Query one order
    pub async fn get_order(&self, order_id: &str) -> Result<String> {
        let command = envelope::get_order(order_id, self.session.now_secs());
        self.session.send_authenticated(command).await
    }

    /// Cancel one order
    pub async fn cancel_order(&self, order_id: &str) -> Result<String> {
        let command = envelope::cancel_order(order_id, self.session.now_secs());
        self.session.send_authenticated(command).await
    }

    /// Query archived (closed) orders, optionally bounded by creation date
    pub async fn archived_orders(
        &self,
        pair: &str,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<String> {
        let command = envelope::archived_orders(
            pair,
            date_from.map(|from| from.timestamp()),
            date_to.map(|to| to.timestamp()),
            limit,
            self.session.now_secs(),
        )?;
        self.session.send_authenticated(command).await
    }

    /// Send an arbitrary authenticated command frame: `{"e": event, "data":
    /// data, "oid": ...}`. For commands without a dedicated method.
    pub async fn send_command(&self, event: &str, data: Value) -> Result<String> {
        let command = envelope::generic(event, data, self.session.now_secs());
        self.session.send_authenticated(command).await
    }
}
