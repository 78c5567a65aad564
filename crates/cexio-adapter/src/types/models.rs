/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::enums::Side;

/// Ticker snapshot. The exchange mixes string and numeric quantities in the
/// same payload; `Decimal`'s deserializer accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub timestamp: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub last: Decimal,
    pub volume: Decimal,
    #[serde(rename = "volume30d")]
    pub volume_30d: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

/// One price level: `[price, amount]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel(pub Decimal, pub Decimal);

/// Order book snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub timestamp: u64,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub pair: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub sell_total: Option<Decimal>,
    #[serde(default)]
    pub buy_total: Option<Decimal>,
}

/// Public trade history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEntry {
    #[serde(rename = "type")]
    pub side: Side,
    pub date: String,
    pub amount: Decimal,
    pub price: Decimal,
    pub tid: String,
}

/// Per-currency balance figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyBalance {
    pub available: Decimal,
    #[serde(default)]
    pub orders: Option<Decimal>,
}

/// Full account balance: a couple of fixed fields plus one entry per currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub currencies: HashMap<String, CurrencyBalance>,
}

/// Response to a successful order placement (also cancel-replace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: String,
    pub time: i64,
    pub complete: bool,
    pub pending: Decimal,
    pub amount: Decimal,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub side: Side,
}

/// Open order as listed by `open_orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub time: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    pub pending: Decimal,
    #[serde(default)]
    pub symbol1: Option<String>,
    #[serde(default)]
    pub symbol2: Option<String>,
}

/// `last_price` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPrice {
    pub lprice: Decimal,
    pub curr1: String,
    pub curr2: String,
}

/// One entry of the multi-pair `last_prices` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPriceEntry {
    pub symbol1: String,
    pub symbol2: String,
    pub lprice: Decimal,
}

/// `convert` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertResult {
    pub amnt: Decimal,
}

/// One point of the `price_stats` series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatsPoint {
    pub tmsp: i64,
    pub price: Decimal,
}

/// Trading limits for one pair, from `currency_limits`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairLimit {
    pub symbol1: String,
    pub symbol2: String,
    #[serde(rename = "minLotSize", default)]
    pub min_lot_size: Option<Decimal>,
    #[serde(rename = "minLotSizeS2", default)]
    pub min_lot_size_s2: Option<Decimal>,
    #[serde(rename = "maxLotSize", default)]
    pub max_lot_size: Option<Decimal>,
    #[serde(rename = "minPrice", default)]
    pub min_price: Option<Decimal>,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<Decimal>,
}

/// Fee rates for one pair, from `get_myfee`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeEntry {
    pub buy: Decimal,
    pub sell: Decimal,
    #[serde(rename = "buyMaker", default)]
    pub buy_maker: Option<Decimal>,
    #[serde(rename = "sellMaker", default)]
    pub sell_maker: Option<Decimal>,
}
