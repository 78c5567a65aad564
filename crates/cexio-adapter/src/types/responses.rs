/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{FeeEntry, LastPriceEntry, PairLimit, Ticker};

/// Envelope used by the `{e, ok, data}`-shaped REST responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub e: Option<String>,
    pub ok: String,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyLimitsData {
    pub pairs: Vec<PairLimit>,
}

pub type CurrencyLimitsResponse = ApiEnvelope<CurrencyLimitsData>;

pub type TickersResponse = ApiEnvelope<Vec<Ticker>>;

pub type LastPricesResponse = ApiEnvelope<Vec<LastPriceEntry>>;

/// Fee rates keyed by `"S1:S2"` pair name
pub type MyFeeResponse = ApiEnvelope<HashMap<String, FeeEntry>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes() {
        let raw = r#"{
            "e": "currency_limits",
            "ok": "ok",
            "data": {
                "pairs": [
                    {"symbol1": "BTC", "symbol2": "USD", "minLotSize": 0.002, "minPrice": "1", "maxPrice": "4096"}
                ]
            }
        }"#;

        let response: CurrencyLimitsResponse = serde_json::from_str(raw).expect("limits decode");
        assert_eq!(response.ok, "ok");
        assert_eq!(response.data.pairs[0].symbol1, "BTC");
        assert_eq!(response.data.pairs[0].max_lot_size, None);
    }
}
