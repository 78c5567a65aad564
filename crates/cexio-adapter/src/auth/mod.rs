/*
[INPUT]:  API credentials and signing parameters
[OUTPUT]: Nonces and HMAC-SHA256 request signatures
[POS]:    Auth layer - credentials, nonces, signing
[UPDATE]: When changing signing algorithm or credential handling
*/

pub mod credentials;
pub mod nonce;
pub mod signer;

pub use credentials::Credentials;
pub use nonce::{Clock, SystemClock};
pub use signer::{hmac_sha256_hex_upper, rest_signature, ws_signature};
