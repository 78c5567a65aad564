/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side, serialized as the exchange's lower-case `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_wire_format() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""buy""#);
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), r#""sell""#);

        let side: Side = serde_json::from_str(r#""sell""#).unwrap();
        assert_eq!(side, Side::Sell);
    }
}
