/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, WebSocket)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the CEX.IO adapter
#[derive(Error, Debug)]
pub enum CexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {message}")]
    Api { message: String },

    /// Connection-level WebSocket failure (network drop, TLS, abnormal close)
    #[error("WebSocket transport error: {0}")]
    Transport(String),

    /// Send attempted while no WebSocket connection is live
    #[error("WebSocket is not connected")]
    NotConnected,

    /// A second connection attempted on an already-open session
    #[error("WebSocket is already connected")]
    AlreadyConnected,

    /// Operation attempted after `stop()`; stopped sessions are terminal
    #[error("session has been stopped")]
    Stopped,

    /// Authenticated command issued while the session is not authenticated
    #[error("authentication required to send {command}")]
    AuthRequired { command: String },

    /// Server explicitly denied authentication
    #[error("authentication rejected: {reason}")]
    AuthRejected { reason: String },

    /// Inbound frame failed to parse as JSON
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Currency pair not in "S1/S2" form
    #[error("invalid currency pair: {0}")]
    InvalidPair(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CexError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CexError::Http(_)
                | CexError::Transport(_)
                | CexError::NotConnected
                | CexError::InvalidResponse(_)
        )
    }

    /// Check if error indicates an authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CexError::AuthRequired { .. } | CexError::AuthRejected { .. }
        )
    }

    /// Create an API error from a server-reported message
    pub fn api_error(message: impl Into<String>) -> Self {
        CexError::Api {
            message: message.into(),
        }
    }
}

/// Result type alias for CEX.IO operations
pub type Result<T> = std::result::Result<T, CexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let transport_err = CexError::Transport("connection reset".to_string());
        assert!(transport_err.is_retryable());

        let auth_err = CexError::AuthRequired {
            command: "place-order".to_string(),
        };
        assert!(!auth_err.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(
            CexError::AuthRejected {
                reason: "Invalid API key".to_string()
            }
            .is_auth_error()
        );
        assert!(
            CexError::AuthRequired {
                command: "get-balance".to_string()
            }
            .is_auth_error()
        );
        assert!(!CexError::NotConnected.is_auth_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = CexError::api_error("Rate limit exceeded");
        match err {
            CexError::Api { message } => assert_eq!(message, "Rate limit exceeded"),
            _ => panic!("Expected Api error variant"),
        }
    }
}
