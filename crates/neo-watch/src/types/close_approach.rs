//! Close-approach records as delivered by NeoWs
//!
//! A record is kept as the raw JSON object so that anything the filter
//! surfaces is byte-for-byte what the upstream source sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Field holding the full close-approach timestamp (`YYYY-Mon-DD HH:MM`)
pub const CLOSE_APPROACH_DATE_FULL: &str = "close_approach_date_full";

/// One close-approach event of an asteroid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloseApproachRecord(Map<String, Value>);

impl CloseApproachRecord {
    /// Wrap an existing JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record carrying only `close_approach_date_full`
    pub fn with_date_full(date_full: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            CLOSE_APPROACH_DATE_FULL.to_string(),
            Value::String(date_full.into()),
        );
        Self(fields)
    }

    /// The full close-approach timestamp
    ///
    /// Fails with [`Error::MissingField`] when the field is absent or not a string.
    pub fn date_full(&self) -> Result<&str> {
        self.0
            .get(CLOSE_APPROACH_DATE_FULL)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_field(CLOSE_APPROACH_DATE_FULL))
    }

    /// Day-precision date (`YYYY-MM-DD`)
    pub fn close_approach_date(&self) -> Option<&str> {
        self.0.get("close_approach_date").and_then(Value::as_str)
    }

    /// Relative velocity in km/s
    ///
    /// NeoWs sends numbers as strings; both forms are accepted.
    pub fn relative_velocity_kps(&self) -> Option<f64> {
        self.0
            .get("relative_velocity")
            .and_then(|v| v.get("kilometers_per_second"))
            .and_then(number_like)
    }

    /// Miss distance in kilometers
    pub fn miss_distance_km(&self) -> Option<f64> {
        self.0
            .get("miss_distance")
            .and_then(|v| v.get("kilometers"))
            .and_then(number_like)
    }

    pub fn orbiting_body(&self) -> Option<&str> {
        self.0.get("orbiting_body").and_then(Value::as_str)
    }

    /// Raw field access
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CloseApproachRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
