use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Name/value pair used for event codes, parameters and geocodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePair {
    pub value_name: String,
    pub value: String,
}

/// Language-specific content of an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub categories: Vec<String>,

    pub event: String,

    #[serde(default)]
    pub response_types: Vec<String>,

    pub urgency: String,

    pub severity: String,

    pub certainty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_codes: Vec<ValuePair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ValuePair>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub areas: Vec<Area>,
}

// CAP's default when <language> is absent
fn default_language() -> String {
    "en-US".to_string()
}

/// Supplementary file attached to an information block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub description: String,

    pub mime_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Inline base64 content. Excluded from search responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deref_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Geographic region an information block applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub description: String,

    /// Indexed shape(s), stored as GeoJSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub circles: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geocodes: Vec<ValuePair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<f64>,
}
