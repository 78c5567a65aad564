/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public CEX.IO adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{Clock, Credentials, SystemClock};

// Re-export commonly used types from http
pub use http::{CexClient, CexError, ClientConfig, Result};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    CexWsClient,
    EventKind,
    InboundFrame,
    SessionEvent,
    SessionState,
    WsConfig,
};
