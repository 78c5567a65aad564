/*
[INPUT]:  Account identity, API key, API secret
[OUTPUT]: Credentials value shared by the REST and WebSocket clients
[POS]:    Auth layer - credential ownership
[UPDATE]: When the exchange changes its credential model
*/

use std::fmt;

/// API credentials for CEX.IO.
///
/// Immutable for the lifetime of a client/session. The REST signature covers
/// `username`; the WebSocket signature covers only `api_key`.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

// Manual Debug so the secret never lands in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("up100000000", "key123", "topsecret");
        let rendered = format!("{credentials:?}");

        assert!(rendered.contains("up100000000"));
        assert!(rendered.contains("key123"));
        assert!(!rendered.contains("topsecret"));
    }
}
