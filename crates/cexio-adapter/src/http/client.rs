/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::auth::{Clock, Credentials, SystemClock, rest_signature};
use crate::http::{CexError, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Base URL for the CEX.IO REST API
const API_BASE_URL: &str = "https://cex.io/api/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// REST client for the CEX.IO trading API.
///
/// Public endpoints are plain GETs; private endpoints POST a JSON body with
/// `key`, `signature` and `nonce` injected (signature over
/// `nonce + username + key`, see [`crate::auth::rest_signature`]).
pub struct CexClient {
    http_client: Client,
    base_url: Url,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl CexClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(credentials, config, API_BASE_URL)
    }

    /// Create a client against a custom base URL (mock servers in tests)
    pub fn with_config_and_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        Self::with_config_base_url_and_clock(credentials, config, base_url, Arc::new(SystemClock))
    }

    /// Fully parameterized constructor; a pinned clock makes nonces and
    /// signatures deterministic in tests
    pub fn with_config_base_url_and_clock(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("client-cex.io-{}", credentials.username))
            .build()?;

        // Endpoints are joined onto the base, so it must end with a slash.
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http_client,
            base_url: Url::parse(&base)?,
            credentials,
            clock,
        })
    }

    /// Build the full URL for an endpoint, with the optional `S1/S2` pair
    /// appended as path segments
    fn endpoint_url(&self, method: &str, pair: Option<&str>) -> Result<Url> {
        let path = match pair {
            Some(pair) => format!("{method}/{pair}/"),
            None => format!("{method}/"),
        };
        Ok(self.base_url.join(&path)?)
    }

    /// Auth fields appended to every private request body
    fn auth_params(&self) -> Map<String, Value> {
        let nonce = self.clock.now_ms().to_string();
        let signature = rest_signature(
            &nonce,
            &self.credentials.username,
            &self.credentials.api_key,
            &self.credentials.api_secret,
        );

        let mut params = Map::new();
        params.insert("key".into(), Value::String(self.credentials.api_key.clone()));
        params.insert("signature".into(), Value::String(signature));
        params.insert("nonce".into(), Value::String(nonce));
        params
    }

    /// GET a public endpoint
    pub(crate) async fn public_get<T: DeserializeOwned>(
        &self,
        method: &str,
        pair: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint_url(method, pair)?;
        debug!(%url, "public GET");
        let mut builder = self.http_client.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send_json(builder).await
    }

    /// POST a private endpoint with auth fields merged into `params`
    pub(crate) async fn private_post<T: DeserializeOwned>(
        &self,
        method: &str,
        pair: Option<&str>,
        mut params: Map<String, Value>,
    ) -> Result<T> {
        let url = self.endpoint_url(method, pair)?;
        debug!(%url, "private POST");
        params.append(&mut self.auth_params());
        let builder = self.http_client.post(url).json(&params);
        self.send_json(builder).await
    }

    /// Send the request, surface `{"error": ...}` bodies, decode the rest
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        if let Some(message) = body.get("error").and_then(|value| value.as_str()) {
            return Err(CexError::api_error(message));
        }
        if !status.is_success() {
            return Err(CexError::InvalidResponse(format!(
                "unexpected HTTP status {status}"
            )));
        }

        Ok(serde_json::from_value(body)?)
    }
}
