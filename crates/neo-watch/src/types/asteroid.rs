//! Near-Earth object documents (NeoWs `neo/browse` and `neo/{id}` shapes)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CloseApproachRecord;

/// An asteroid as returned by NeoWs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// NeoWs identifier
    pub id: String,
    /// SPK-ID based reference id
    #[serde(default)]
    pub neo_reference_id: String,
    /// Display name, e.g. `433 Eros (A898 PA)`
    pub name: String,
    /// Date the document was pulled from the API (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_potentially_hazardous_asteroid: Option<bool>,
    /// Orbit solution metadata
    pub orbital_data: OrbitalData,
    /// Close approaches, past and future
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproachRecord>,
    /// Everything else NeoWs sends (links, estimated_diameter, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NearEarthObject {
    /// Current orbit-determination date string
    pub fn orbit_determination_date(&self) -> &str {
        &self.orbital_data.orbit_determination_date
    }
}

/// Orbit solution metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalData {
    /// Timestamp of the orbit solution (`YYYY-MM-DD HH:MM:SS`)
    pub orbit_determination_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of the NeoWs browse endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowsePage {
    #[serde(default)]
    pub near_earth_objects: Vec<NearEarthObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
}

impl BrowsePage {
    /// Accept either a browse page or a bare asteroid document
    pub fn from_json_value(value: Value) -> serde_json::Result<Self> {
        if value.get("near_earth_objects").is_some() {
            serde_json::from_value(value)
        } else if value.is_array() {
            Ok(Self {
                near_earth_objects: serde_json::from_value(value)?,
                links: None,
                page: None,
            })
        } else {
            Ok(Self {
                near_earth_objects: vec![serde_json::from_value(value)?],
                links: None,
                page: None,
            })
        }
    }
}
