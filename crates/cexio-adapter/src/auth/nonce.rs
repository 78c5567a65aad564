/*
[INPUT]:  Wall-clock time source
[OUTPUT]: Timestamp-derived nonces for REST and WebSocket authentication
[POS]:    Auth layer - nonce generation
[UPDATE]: When the exchange changes its nonce resolution requirements
*/

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for nonce generation, injectable for tests.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;

    /// Current time in whole seconds since Unix epoch.
    ///
    /// The WebSocket auth handshake uses this resolution; two auth attempts
    /// inside the same second would reuse a nonce, which the exchange rejects.
    /// A fresh attempt only happens on reconnect, so in practice the delay
    /// between attempts keeps nonces distinct.
    fn now_secs(&self) -> u64 {
        self.now_ms() / 1000
    }
}

/// System clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_millis() as u64
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_secs_derived_from_ms() {
        let clock = FixedClock(1_700_000_123_456);
        assert_eq!(clock.now_ms(), 1_700_000_123_456);
        assert_eq!(clock.now_secs(), 1_700_000_123);
    }

    #[test]
    fn test_system_clock_is_sane() {
        // 2023-11-14 in ms; any correctly set clock is far past this.
        assert!(SystemClock.now_ms() > 1_700_000_000_000);
    }
}
