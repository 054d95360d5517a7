//! Raw Elasticsearch response shapes

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    pub hits: RawHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHits {
    #[serde(default)]
    pub total: Option<RawTotal>,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

impl RawHits {
    /// Total matches as reported by the store, independent of pagination
    pub fn total_value(&self) -> u64 {
        match &self.total {
            Some(RawTotal::Count(value)) => *value,
            Some(RawTotal::Object { value, .. }) => *value,
            None => 0,
        }
    }
}

/// 6.x reports a bare number, 7.x and later an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTotal {
    Count(u64),
    Object {
        value: u64,
        relation: RawTotalRelation,
    },
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub enum RawTotalRelation {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,

    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    #[serde(rename = "_source", default)]
    pub source: Option<serde_json::Value>,

    /// Position of this hit inside its parent array, for inner hits only
    #[serde(rename = "_nested", default)]
    pub nested: Option<NestedIdentity>,

    #[serde(default)]
    pub inner_hits: HashMap<String, RawInnerHits>,
}

impl RawHit {
    pub fn inner(&self, path: &str) -> Option<&[RawHit]> {
        self.inner_hits.get(path).map(|inner| inner.hits.hits.as_slice())
    }
}

#[derive(Debug, Deserialize)]
pub struct RawInnerHits {
    pub hits: RawHits,
}

/// Chain of (field, offset) pairs from the root document down to a nested hit.
///
/// Inner hits of a multi-level nested query carry the full chain, so an area
/// hit reports `infos[5] -> areas[3]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NestedIdentity {
    pub field: String,
    pub offset: usize,
    #[serde(rename = "_nested", default)]
    pub child: Option<Box<NestedIdentity>>,
}

impl NestedIdentity {
    /// Offset of the innermost element
    pub fn leaf_offset(&self) -> usize {
        let mut identity = self;
        while let Some(child) = identity.child.as_deref() {
            identity = child;
        }
        identity.offset
    }
}

#[derive(Debug, Deserialize)]
pub struct RawGetResponse {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub found: bool,

    #[serde(rename = "_source", default)]
    pub source: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_as_number() {
        let response: RawSearchResponse =
            serde_json::from_value(serde_json::json!({ "hits": { "total": 42, "hits": [] } })).unwrap();
        assert_eq!(response.hits.total_value(), 42);
    }

    #[test]
    fn test_total_as_object() {
        let response: RawSearchResponse = serde_json::from_value(serde_json::json!({
            "took": 3,
            "timed_out": false,
            "hits": { "total": { "value": 10000, "relation": "gte" }, "hits": [] }
        }))
        .unwrap();
        assert_eq!(response.hits.total_value(), 10000);
        assert!(matches!(
            response.hits.total,
            Some(RawTotal::Object {
                relation: RawTotalRelation::Gte,
                ..
            })
        ));
    }

    #[test]
    fn test_nested_identity_leaf() {
        let identity: NestedIdentity = serde_json::from_value(serde_json::json!({
            "field": "infos",
            "offset": 5,
            "_nested": { "field": "areas", "offset": 3 }
        }))
        .unwrap();

        assert_eq!(identity.offset, 5);
        assert_eq!(identity.leaf_offset(), 3);
    }

    #[test]
    fn test_inner_hits_lookup() {
        let hit: RawHit = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "_source": {},
            "inner_hits": {
                "infos": {
                    "hits": {
                        "total": 1,
                        "hits": [ { "_nested": { "field": "infos", "offset": 0 } } ]
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(hit.inner("infos").map(<[RawHit]>::len), Some(1));
        assert!(hit.inner("infos.areas").is_none());
    }
}
