use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display shape for activity timestamps, e.g. `8/25/2026, 3:07:09 PM`.
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// One entry of the activity log served by `GET /users`. Read-only on
/// this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub action: String,
    pub timestamp: String,
    pub details: String,
}

impl Activity {
    /// Timestamp as shown in the feed. Understands RFC 3339 and the
    /// API's plain `YYYY-MM-DD HH:MM:SS` form; anything else passes
    /// through unchanged.
    pub fn display_timestamp(&self) -> String {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%d %H:%M:%S") {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        self.timestamp.clone()
    }
}
