/*
[INPUT]:  Decoded inbound frames with their "e" event tag
[OUTPUT]: Total classification into event kinds and session events
[POS]:    WebSocket layer - inbound event dispatch
[UPDATE]: When the exchange adds new event tags
*/

use serde_json::Value;

/// Every inbound event tag the exchange emits, plus a catch-all.
///
/// Classification is total: an unrecognized tag maps to [`EventKind::Unknown`]
/// and never raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `ping` - answered with a pong by the session itself
    Ping,
    /// `auth` - authentication acknowledgement
    AuthAck,
    /// `tick` - tickers room update
    Tick,
    /// `ohlcv*` - candle stream messages (several tag spellings, same family)
    Ohlcv,
    /// `md` - order book snapshot
    OrderBookSnapshot,
    /// `md_grouped` - grouped order book snapshot
    OrderBookGrouped,
    /// `history` - pair room trade history
    TradeHistory,
    /// `history-update` - incremental trade history
    TradeHistoryUpdate,
    /// `order-book-subscribe` - subscription acknowledgement with snapshot
    OrderBookSubscribeAck,
    /// `order-book-unsubscribe`
    OrderBookUnsubscribeAck,
    /// `open-orders` - response to the open-orders command
    OpenOrdersResult,
    /// `place-order` - response to an order placement
    PlaceOrderResult,
    /// `cancel-replace-order`
    CancelReplaceResult,
    /// `cancel-order`
    CancelOrderResult,
    /// `ticker` - response to the ticker command
    TickerResult,
    /// `get-balance`
    BalanceResult,
    /// `get-order`
    OrderResult,
    /// `archived-orders`
    ArchivedOrdersResult,
    /// `tx` - transaction created on the account
    Transaction,
    /// `balance` - pushed balance change
    BalancePush,
    /// `obalance` - pushed order-book balance change
    OrderBookBalancePush,
    /// `md_update` - incremental order book update
    MarketDataUpdate,
    /// `order` - order lifecycle push
    OrderUpdate,
    /// Anything else
    Unknown,
}

/// Map an event tag to its kind. Total and side-effect-free.
pub fn classify(tag: &str) -> EventKind {
    match tag {
        "ping" => EventKind::Ping,
        "auth" => EventKind::AuthAck,
        "tick" => EventKind::Tick,
        "md" => EventKind::OrderBookSnapshot,
        "md_grouped" => EventKind::OrderBookGrouped,
        "md_update" => EventKind::MarketDataUpdate,
        "history" => EventKind::TradeHistory,
        "history-update" => EventKind::TradeHistoryUpdate,
        "order-book-subscribe" => EventKind::OrderBookSubscribeAck,
        "order-book-unsubscribe" => EventKind::OrderBookUnsubscribeAck,
        "open-orders" => EventKind::OpenOrdersResult,
        "place-order" => EventKind::PlaceOrderResult,
        "cancel-replace-order" => EventKind::CancelReplaceResult,
        "cancel-order" => EventKind::CancelOrderResult,
        "ticker" => EventKind::TickerResult,
        "get-balance" => EventKind::BalanceResult,
        "get-order" => EventKind::OrderResult,
        "archived-orders" => EventKind::ArchivedOrdersResult,
        "tx" => EventKind::Transaction,
        "balance" => EventKind::BalancePush,
        "obalance" => EventKind::OrderBookBalancePush,
        "order" => EventKind::OrderUpdate,
        tag if tag.starts_with("ohlcv") => EventKind::Ohlcv,
        _ => EventKind::Unknown,
    }
}

/// One decoded inbound frame: tag, classification and full payload.
/// Transient - dispatched to the event channel and dropped.
#[derive(Debug, Clone)]
pub struct InboundFrame {
    pub tag: String,
    pub kind: EventKind,
    pub payload: Value,
}

impl InboundFrame {
    pub fn from_value(payload: Value) -> Self {
        let tag = payload
            .get("e")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind = classify(&tag);
        Self { tag, kind, payload }
    }

    /// Correlation id echoed from the outbound command, if any
    pub fn oid(&self) -> Option<&str> {
        self.payload.get("oid").and_then(Value::as_str)
    }

    /// The event-specific body, if the frame nests one under `data`
    pub fn data(&self) -> Option<&Value> {
        self.payload.get("data")
    }
}

/// What the session reports to its consumer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Transport is open; the auth request has been issued
    Connected,
    /// Server acknowledged authentication
    Authenticated,
    /// Server denied authentication; the session stays connected but
    /// unauthenticated until the next reconnect generates a fresh nonce
    AuthFailed { reason: String },
    /// A classified inbound frame
    Frame(InboundFrame),
    /// Connection lost; a reconnect is scheduled unless stop was requested
    Disconnected { reason: String },
}
