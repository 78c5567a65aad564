/*
[INPUT]:  Order parameters with auth fields injected per request
[OUTPUT]: Order placements, cancellations and order queries
[POS]:    HTTP layer - trading endpoints (require key/signature/nonce)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{CexClient, Result};
use crate::types::{ArchivedOrdersFilter, OpenOrder, PlacedOrder, Side};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};

impl CexClient {
    /// Open orders, for one pair or across all pairs
    ///
    /// POST /open_orders/[{pair}/]
    pub async fn open_orders(&self, pair: Option<&str>) -> Result<Vec<OpenOrder>> {
        self.private_post("open_orders", pair, Map::new()).await
    }

    /// Status snapshot for a list of order ids
    ///
    /// POST /active_orders_status/
    pub async fn active_orders_status(&self, order_ids: &[&str]) -> Result<Value> {
        let mut params = Map::new();
        params.insert("orders_list".into(), json!(order_ids));
        self.private_post("active_orders_status", None, params).await
    }

    /// Place a limit order
    ///
    /// POST /place_order/{pair}/
    pub async fn place_order(
        &self,
        pair: &str,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> Result<PlacedOrder> {
        let mut params = Map::new();
        params.insert("type".into(), json!(side));
        params.insert("amount".into(), json!(amount.to_string()));
        params.insert("price".into(), json!(price.to_string()));
        self.private_post("place_order", Some(pair), params).await
    }

    /// Place a market order
    ///
    /// POST /place_order/{pair}/ with order_type=market
    pub async fn place_market_order(
        &self,
        pair: &str,
        side: Side,
        amount: Decimal,
    ) -> Result<PlacedOrder> {
        let mut params = Map::new();
        params.insert("type".into(), json!(side));
        params.insert("amount".into(), json!(amount.to_string()));
        params.insert("order_type".into(), json!("market"));
        self.private_post("place_order", Some(pair), params).await
    }

    /// Cancel one order; the exchange answers with a bare boolean
    ///
    /// POST /cancel_order/
    pub async fn cancel_order(&self, order_id: &str) -> Result<bool> {
        let mut params = Map::new();
        params.insert("id".into(), json!(order_id));
        self.private_post("cancel_order", None, params).await
    }

    /// Cancel all open orders for a pair
    ///
    /// POST /cancel_orders/{pair}/
    pub async fn cancel_all_orders(&self, pair: &str) -> Result<Value> {
        self.private_post("cancel_orders", Some(pair), Map::new())
            .await
    }

    /// Atomically cancel an order and place a replacement
    ///
    /// POST /cancel_replace_order/{pair}/
    pub async fn cancel_replace_order(
        &self,
        pair: &str,
        side: Side,
        amount: Decimal,
        price: Decimal,
        order_id: &str,
    ) -> Result<PlacedOrder> {
        let mut params = Map::new();
        params.insert("order_id".into(), json!(order_id));
        params.insert("type".into(), json!(side));
        params.insert("amount".into(), json!(amount.to_string()));
        params.insert("price".into(), json!(price.to_string()));
        self.private_post("cancel_replace_order", Some(pair), params)
            .await
    }

    /// Details for one order. The payload shape varies with order state, so
    /// it is left as raw JSON.
    ///
    /// POST /get_order/
    pub async fn get_order(&self, order_id: &str) -> Result<Value> {
        let mut params = Map::new();
        params.insert("id".into(), json!(order_id));
        self.private_post("get_order", None, params).await
    }

    /// Transactions belonging to one order
    ///
    /// POST /get_order_tx/
    pub async fn get_order_tx(&self, order_id: &str) -> Result<Value> {
        let mut params = Map::new();
        params.insert("id".into(), json!(order_id));
        self.private_post("get_order_tx", None, params).await
    }

    /// Archived (closed) orders matching the filter
    ///
    /// POST /archived_orders/{pair}/
    pub async fn archived_orders(
        &self,
        pair: &str,
        filter: &ArchivedOrdersFilter,
    ) -> Result<Vec<Value>> {
        let params = match serde_json::to_value(filter)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.private_post("archived_orders", Some(pair), params).await
    }
}
