/*
[INPUT]:  WebSocket configuration and session commands
[OUTPUT]: Authenticated real-time session with market data and order events
[POS]:    WebSocket layer - session lifecycle and event dispatch
[UPDATE]: When adding new commands or changing connection logic
*/

pub mod client;
pub mod envelope;
pub mod event;
pub mod session;

pub use client::CexWsClient;
pub use event::{EventKind, InboundFrame, SessionEvent};
pub use session::{SessionState, WsConfig};
