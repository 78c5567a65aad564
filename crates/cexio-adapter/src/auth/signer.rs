/*
[INPUT]:  Nonce, identity, API key and secret
[OUTPUT]: Upper-case hex HMAC-SHA256 request signatures
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm or message format
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over `message` keyed by `secret`, rendered as upper-case hex.
///
/// Byte encoding happens once at this boundary; both signature forms below
/// are thin wrappers that only differ in how the message is assembled.
pub fn hmac_sha256_hex_upper(secret: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key error");
    mac.update(message.as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Signature for the WebSocket auth frame: HMAC over `"{nonce}{key}"`.
pub fn ws_signature(nonce: u64, api_key: &str, api_secret: &str) -> String {
    hmac_sha256_hex_upper(api_secret, &format!("{nonce}{api_key}"))
}

/// Signature for private REST calls: HMAC over `"{nonce}{username}{key}"`.
pub fn rest_signature(nonce: &str, username: &str, api_key: &str, api_secret: &str) -> String {
    hmac_sha256_hex_upper(api_secret, &format!("{nonce}{username}{api_key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2.
    #[test]
    fn test_known_vector() {
        let signature = hmac_sha256_hex_upper("Jefe", "what do ya want for nothing?");
        assert_eq!(
            signature,
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_ws_signature_shape() {
        let signature = ws_signature(1_700_000_000, "key", "secret");

        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!signature.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_deterministic() {
        let a = ws_signature(1_700_000_000, "key", "secret");
        let b = ws_signature(1_700_000_000, "key", "secret");
        assert_eq!(a, b);
    }

    #[test]
    fn test_nonce_changes_signature() {
        let a = ws_signature(1_700_000_000, "key", "secret");
        let b = ws_signature(1_700_000_001, "key", "secret");
        assert_ne!(a, b);
    }

    #[test]
    fn test_rest_signature_covers_identity() {
        let with_user = rest_signature("1700000000000", "alice", "key", "secret");
        let other_user = rest_signature("1700000000000", "bob", "key", "secret");
        assert_ne!(with_user, other_user);
    }
}
