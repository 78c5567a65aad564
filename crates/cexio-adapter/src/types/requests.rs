/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filters for the `archived_orders` endpoints.
///
/// Timestamps are Unix seconds on the wire; [`ArchivedOrdersFilter::between`]
/// builds the common date-range case from `chrono` instants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchivedOrdersFilter {
    #[serde(rename = "dateFrom", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<i64>,
    #[serde(rename = "dateTo", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<i64>,
    #[serde(rename = "lastTxDateFrom", skip_serializing_if = "Option::is_none")]
    pub last_tx_date_from: Option<i64>,
    #[serde(rename = "lastTxDateTo", skip_serializing_if = "Option::is_none")]
    pub last_tx_date_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ArchivedOrdersFilter {
    /// Orders whose creation date falls in `[from, to]`
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            date_from: Some(from.timestamp()),
            date_to: Some(to.timestamp()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
