/*
[INPUT]:  Pair identifiers and query parameters
[OUTPUT]: Market data (limits, tickers, order book, trade history, OHLCV)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{CexClient, Result};
use crate::types::{
    CurrencyLimitsResponse, LastPrice, LastPricesResponse, OrderBook, Ticker, TickersResponse,
    TradeEntry,
};

impl CexClient {
    /// Trading limits for all pairs
    ///
    /// GET /currency_limits/
    pub async fn currency_limits(&self) -> Result<CurrencyLimitsResponse> {
        self.public_get("currency_limits", None, &[]).await
    }

    /// Ticker for one pair
    ///
    /// GET /ticker/{pair}/
    pub async fn ticker(&self, pair: &str) -> Result<Ticker> {
        self.public_get("ticker", Some(pair), &[]).await
    }

    /// Tickers for all pairs quoted in the given markets (e.g. `"USD/EUR"`)
    ///
    /// GET /tickers/{markets}/
    pub async fn tickers(&self, markets: &str) -> Result<TickersResponse> {
        self.public_get("tickers", Some(markets), &[]).await
    }

    /// Last trade price for one pair
    ///
    /// GET /last_price/{pair}/
    pub async fn last_price(&self, pair: &str) -> Result<LastPrice> {
        self.public_get("last_price", Some(pair), &[]).await
    }

    /// Last prices for the given markets
    ///
    /// GET /last_prices/{markets}/
    pub async fn last_prices(&self, markets: &str) -> Result<LastPricesResponse> {
        self.public_get("last_prices", Some(markets), &[]).await
    }

    /// Order book snapshot, optionally truncated to `depth` levels per side
    ///
    /// GET /order_book/{pair}/?depth={depth}
    pub async fn order_book(&self, pair: &str, depth: Option<u32>) -> Result<OrderBook> {
        let query: Vec<(&str, String)> = match depth {
            Some(depth) => vec![("depth", depth.to_string())],
            None => Vec::new(),
        };
        self.public_get("order_book", Some(pair), &query).await
    }

    /// Public trade history, newest first, optionally since a trade id
    ///
    /// GET /trade_history/{pair}/?since={since}
    pub async fn trade_history(&self, pair: &str, since: Option<u64>) -> Result<Vec<TradeEntry>> {
        let query: Vec<(&str, String)> = match since {
            Some(since) => vec![("since", since.to_string())],
            None => Vec::new(),
        };
        self.public_get("trade_history", Some(pair), &query).await
    }

    /// Historical one-minute OHLCV chart for one day, `date` as `YYYYMMDD`.
    /// The payload nests stringified candle arrays, left undecoded here.
    ///
    /// GET /ohlcv/hd/{date}/{pair}/
    pub async fn historical_1m_ohlcv(&self, date: &str, pair: &str) -> Result<serde_json::Value> {
        let method = format!("ohlcv/hd/{date}");
        self.public_get(&method, Some(pair), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::http::{CexClient, ClientConfig};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CexClient {
        CexClient::with_config_and_base_url(
            Credentials::new("user", "key", "secret"),
            ClientConfig::default(),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_ticker() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "timestamp": "1513173815",
            "low": "16365.3",
            "high": "17990",
            "last": "16972.9",
            "volume": "261.17415086",
            "volume30d": "7388.88954247",
            "bid": 16925,
            "ask": 16972.9
        }"#;

        Mock::given(method("GET"))
            .and(path("/ticker/BTC/USD/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ticker = client_for(&server)
            .ticker("BTC/USD")
            .await
            .expect("ticker failed");

        assert_eq!(ticker.bid, "16925".parse().unwrap());
        assert_eq!(ticker.last, "16972.9".parse().unwrap());
    }

    #[tokio::test]
    async fn test_order_book_depth_param() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "timestamp": 1510903757,
            "bids": [[12750.1, 0.49389597]],
            "asks": [[12759.0, 0.2]],
            "pair": "BTC:USD",
            "id": 66478
        }"#;

        Mock::given(method("GET"))
            .and(path("/order_book/BTC/USD/"))
            .and(query_param("depth", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let book = client_for(&server)
            .order_book("BTC/USD", Some(3))
            .await
            .expect("order_book failed");

        assert_eq!(book.pair, "BTC:USD");
        assert_eq!(book.bids.len(), 1);
    }
}
