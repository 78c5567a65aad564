/*
[INPUT]:  Account-level query parameters with auth fields injected
[OUTPUT]: Account data (balance, fees, conversions, price stats)
[POS]:    HTTP layer - account endpoints (require key/signature/nonce)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use crate::http::{CexClient, Result};
use crate::types::{AccountBalance, ConvertResult, MyFeeResponse, PriceStatsPoint};
use rust_decimal::Decimal;
use serde_json::{Map, json};

impl CexClient {
    /// Account balance across all currencies
    ///
    /// POST /balance/
    pub async fn balance(&self) -> Result<AccountBalance> {
        self.private_post("balance", None, Map::new()).await
    }

    /// The account's fee rates per pair
    ///
    /// POST /get_myfee/
    pub async fn get_my_fee(&self) -> Result<MyFeeResponse> {
        self.private_post("get_myfee", None, Map::new()).await
    }

    /// Convert an amount between the two currencies of a pair
    ///
    /// POST /convert/{pair}/
    pub async fn convert(&self, pair: &str, amount: Decimal) -> Result<ConvertResult> {
        let mut params = Map::new();
        params.insert("amnt".into(), json!(amount.to_string()));
        self.private_post("convert", Some(pair), params).await
    }

    /// Price history points for charting
    ///
    /// POST /price_stats/{pair}/
    pub async fn price_stats(
        &self,
        pair: &str,
        last_hours: u32,
        max_resp_arr_size: u32,
    ) -> Result<Vec<PriceStatsPoint>> {
        let mut params = Map::new();
        params.insert("lastHours".into(), json!(last_hours.to_string()));
        params.insert("maxRespArrSize".into(), json!(max_resp_arr_size.to_string()));
        self.private_post("price_stats", Some(pair), params).await
    }
}
