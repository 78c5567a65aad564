/*
[INPUT]:  Command parameters and a wall-clock timestamp
[OUTPUT]: Outbound frame payloads with correlation ids
[POS]:    WebSocket layer - outbound frame construction
[UPDATE]: When the exchange changes frame shapes or adds commands
*/

use crate::http::{CexError, Result};
use crate::types::Side;
use rust_decimal::Decimal;
use serde_json::{Value, json};

/// An outbound command frame plus the correlation id embedded in it.
///
/// Fire-and-forget: the session hands the payload to the transport and
/// returns the oid; the response arrives asynchronously with the same oid.
#[derive(Debug, Clone)]
pub(crate) struct Command {
    pub payload: Value,
    pub oid: String,
}

/// Correlation ids follow the exchange's `"{method}_{unix_seconds}"` scheme.
/// Seconds resolution means two identical commands inside the same second
/// collide; callers needing stronger uniqueness must rate their calls.
fn oid(method: &str, now: u64) -> String {
    format!("{method}_{now}")
}

/// Split a `"S1/S2"` pair into its two symbols
pub(crate) fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('/')
        .filter(|(s1, s2)| !s1.is_empty() && !s2.is_empty())
        .ok_or_else(|| CexError::InvalidPair(pair.to_string()))
}

pub(crate) fn auth(api_key: &str, signature: &str, nonce: u64) -> Value {
    json!({
        "e": "auth",
        "auth": {
            "key": api_key,
            "signature": signature,
            "timestamp": nonce
        }
    })
}

pub(crate) fn pong() -> Value {
    json!({"e": "pong"})
}

pub(crate) fn subscribe_tickers() -> Value {
    json!({"e": "subscribe", "rooms": ["tickers"]})
}

pub(crate) fn subscribe_ohlcv(pair: &str, timeframe: &str) -> Result<Value> {
    let (s1, s2) = split_pair(pair)?;
    Ok(json!({
        "e": "init-ohlcv",
        "i": timeframe,
        "rooms": [format!("pair-{s1}-{s2}")]
    }))
}

pub(crate) fn subscribe_pair_room(pair: &str) -> Result<Value> {
    let (s1, s2) = split_pair(pair)?;
    Ok(json!({"e": "subscribe", "rooms": [format!("pair-{s1}-{s2}")]}))
}

pub(crate) fn get_ticker(pair: &str, now: u64) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(&format!("{pair}_ticker"), now);
    Ok(Command {
        payload: json!({"e": "ticker", "data": [s1, s2], "oid": oid}),
        oid,
    })
}

pub(crate) fn get_balance(now: u64) -> Command {
    let oid = oid("get-balance", now);
    Command {
        payload: json!({"e": "get-balance", "oid": oid}),
        oid,
    }
}

pub(crate) fn order_book_subscribe(pair: &str, depth: u32, now: u64) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(&format!("{pair}-{depth}-md-subscr"), now);
    Ok(Command {
        payload: json!({
            "e": "order-book-subscribe",
            "data": {
                "pair": [s1, s2],
                "subscribe": true,
                "depth": depth
            },
            "oid": oid
        }),
        oid,
    })
}

pub(crate) fn order_book_unsubscribe(pair: &str, now: u64) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(&format!("{pair}-md-unsubscr"), now);
    Ok(Command {
        payload: json!({
            "e": "order-book-unsubscribe",
            "data": {"pair": [s1, s2]},
            "oid": oid
        }),
        oid,
    })
}

pub(crate) fn open_orders(pair: &str, now: u64) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(&format!("{pair}-open-orders"), now);
    Ok(Command {
        payload: json!({
            "e": "open-orders",
            "data": {"pair": [s1, s2]},
            "oid": oid
        }),
        oid,
    })
}

pub(crate) fn place_order(
    pair: &str,
    side: Side,
    price: Decimal,
    amount: Decimal,
    now: u64,
) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(&format!("{pair}-{side}-{price}-{amount}-place-order"), now);
    Ok(Command {
        payload: json!({
            "e": "place-order",
            "data": {
                "pair": [s1, s2],
                "amount": amount.to_string(),
                "price": price.to_string(),
                "type": side
            },
            "oid": oid
        }),
        oid,
    })
}

pub(crate) fn cancel_replace_order(
    order_id: &str,
    pair: &str,
    side: Side,
    price: Decimal,
    amount: Decimal,
    now: u64,
) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let oid = oid(
        &format!("{order_id}-{pair}-{side}-{price}-{amount}-cancel-replace-order"),
        now,
    );
    Ok(Command {
        payload: json!({
            "e": "cancel-replace-order",
            "data": {
                "order_id": order_id,
                "pair": [s1, s2],
                "amount": amount.to_string(),
                "price": price.to_string(),
                "type": side
            },
            "oid": oid
        }),
        oid,
    })
}

pub(crate) fn get_order(order_id: &str, now: u64) -> Command {
    let oid = oid(&format!("{order_id}-get-order"), now);
    Command {
        payload: json!({
            "e": "get-order",
            "data": {"order_id": order_id},
            "oid": oid
        }),
        oid,
    }
}

pub(crate) fn cancel_order(order_id: &str, now: u64) -> Command {
    let oid = oid(&format!("{order_id}-cancel-order"), now);
    Command {
        payload: json!({
            "e": "cancel-order",
            "data": {"order_id": order_id},
            "oid": oid
        }),
        oid,
    }
}

/// Archived orders. Unlike the other commands this oid carries a random
/// suffix: its parameters (pair, limit) repeat so often that the timestamp
/// alone cannot keep concurrent calls apart.
pub(crate) fn archived_orders(
    pair: &str,
    date_from: Option<i64>,
    date_to: Option<i64>,
    limit: u32,
    now: u64,
) -> Result<Command> {
    let (s1, s2) = split_pair(pair)?;
    let suffix: u32 = rand::random();
    let oid = format!("{s1}-{s2}-archived-orders_{now}_{suffix:08x}");

    let mut data = serde_json::Map::new();
    data.insert("pair".into(), json!([s1, s2]));
    data.insert("limit".into(), json!(limit));
    if let Some(from) = date_from {
        data.insert("dateFrom".into(), json!(from));
    }
    if let Some(to) = date_to {
        data.insert("dateTo".into(), json!(to));
    }

    Ok(Command {
        payload: json!({"e": "archived-orders", "data": data, "oid": oid}),
        oid,
    })
}

/// Escape hatch for commands this crate has no dedicated method for
pub(crate) fn generic(event: &str, data: Value, now: u64) -> Command {
    let oid = oid(event, now);
    Command {
        payload: json!({"e": event, "data": data, "oid": oid}),
        oid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("BTC/USD").unwrap(), ("BTC", "USD"));
        assert!(split_pair("BTCUSD").is_err());
        assert!(split_pair("/USD").is_err());
    }

    #[test]
    fn test_auth_frame_shape() {
        let frame = auth("key", "SIG", 1_700_000_000);
        assert_eq!(frame["e"], "auth");
        assert_eq!(frame["auth"]["key"], "key");
        assert_eq!(frame["auth"]["signature"], "SIG");
        assert_eq!(frame["auth"]["timestamp"], 1_700_000_000_u64);
    }

    #[test]
    fn test_get_balance_oid() {
        let command = get_balance(NOW);
        assert_eq!(command.oid, "get-balance_1700000000");
        assert_eq!(command.payload["oid"], command.oid.as_str());
    }

    #[test]
    fn test_place_order_frame() {
        let command = place_order(
            "BTC/USD",
            Side::Sell,
            "20000".parse().unwrap(),
            "0.002".parse().unwrap(),
            NOW,
        )
        .unwrap();

        assert_eq!(command.payload["e"], "place-order");
        assert_eq!(command.payload["data"]["pair"], json!(["BTC", "USD"]));
        assert_eq!(command.payload["data"]["amount"], "0.002");
        assert_eq!(command.payload["data"]["price"], "20000");
        assert_eq!(command.payload["data"]["type"], "sell");
        assert_eq!(command.oid, "BTC/USD-sell-20000-0.002-place-order_1700000000");
    }

    #[test]
    fn test_order_book_subscribe_carries_depth() {
        let command = order_book_subscribe("BTC/USD", 5, NOW).unwrap();
        assert_eq!(command.payload["data"]["depth"], 5);
        assert_eq!(command.payload["data"]["subscribe"], true);
        assert_eq!(command.oid, "BTC/USD-5-md-subscr_1700000000");
    }

    #[test]
    fn test_archived_orders_oid_unique_within_second() {
        let a = archived_orders("BTC/USD", None, None, 100, NOW).unwrap();
        let b = archived_orders("BTC/USD", None, None, 100, NOW).unwrap();

        assert!(a.oid.starts_with("BTC-USD-archived-orders_1700000000_"));
        assert_ne!(a.oid, b.oid);
    }

    #[test]
    fn test_archived_orders_optional_dates() {
        let command = archived_orders("BTC/USD", Some(100), None, 50, NOW).unwrap();
        assert_eq!(command.payload["data"]["dateFrom"], 100);
        assert!(command.payload["data"].get("dateTo").is_none());
        assert_eq!(command.payload["data"]["limit"], 50);
    }

    #[test]
    fn test_subscribe_frames_have_no_oid() {
        assert!(subscribe_tickers().get("oid").is_none());
        let ohlcv = subscribe_ohlcv("BTC/USD", "1m").unwrap();
        assert_eq!(ohlcv["rooms"], json!(["pair-BTC-USD"]));
        assert_eq!(ohlcv["i"], "1m");
    }
}
